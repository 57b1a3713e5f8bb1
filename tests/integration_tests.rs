/*
 * Integration tests for psumon
 *
 * These tests build a hw-management tree in a temporary directory and
 * drive the library and command dispatch end to end.
 */

use psu_core::{
    build_psus, capture_snapshot, load_settings, save_settings, PlatformIdentity, PsuDevice,
    PsuSettings, SystemSnapshot,
};
use psumon::app;
use psumon::cli::{Cli, Commands};
use clap::Parser;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const AFFECTED_PLATFORM: &str = "x86_64-mlnx_msn3700-r0";

const DELTA_VPD: &str = "\
MFR_NAME = DELTA
PN_VPD_FIELD = MTEF-PSF-AC-C
SN_VPD_FIELD = MT1946X07684
REV_VPD_FIELD = A3
CAPACITY = 1100
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Two PSUs: the first healthy, the second present but not delivering power
fn build_tree(root: &Path) {
    write(root, "thermal/psu1_status", "1\n");
    write(root, "thermal/psu1_pwr_status", "1\n");
    write(root, "power/psu1_volt", "12034\n");
    write(root, "power/psu1_volt_min", "10800\n");
    write(root, "power/psu1_volt_max", "12600\n");
    write(root, "power/psu1_volt_capability", "min max\n");
    write(root, "power/psu1_curr", "8500\n");
    write(root, "power/psu1_power", "102289000\n");
    write(root, "power/psu1_power_capability", "550000000\n");
    write(root, "thermal/psu1_temp", "32500\n");
    write(root, "thermal/psu1_temp_max", "60000\n");
    write(root, "eeprom/psu1_vpd", DELTA_VPD);
    write(root, "fan/psu1_fan1_speed_get", "8200\n");

    write(root, "thermal/psu2_status", "1\n");
    write(root, "thermal/psu2_pwr_status", "0\n");
    write(root, "power/psu2_volt", "11900\n");
    write(root, "power/psu2_volt_max", "12600\n");
}

fn settings_for(root: &Path) -> PsuSettings {
    let mut settings = PsuSettings {
        hw_mgmt_root: root.to_path_buf(),
        platform: Some("x86_64-mlnx_msn2700-r0".to_string()),
        ..PsuSettings::default()
    };
    settings.voltage_workaround.settle_delay_ms = 0;
    settings
}

#[test]
fn test_full_snapshot() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());
    let settings = settings_for(dir.path());
    let ctx = settings.context();

    let psus = build_psus(&settings, &ctx);
    assert_eq!(psus.len(), 2);

    let snapshot = capture_snapshot(&psus, ctx.platform.as_ref());
    assert_eq!(snapshot.platform.as_deref(), Some("x86_64-mlnx_msn2700-r0"));

    let first = &snapshot.psus[0];
    assert_eq!(first.name, "PSU 1");
    assert!(first.presence && first.powergood);
    assert_eq!(first.model, "MTEF-PSF-AC-C");
    assert_eq!(first.serial, "MT1946X07684");
    assert_eq!(first.revision, "A3");
    assert_eq!(first.voltage, Some(12.034));
    assert_eq!(first.voltage_low_threshold, Some(10.8));
    assert_eq!(first.voltage_high_threshold, Some(12.6));
    assert_eq!(first.current, Some(8.5));
    assert_eq!(first.power, Some(102.289));
    assert_eq!(first.max_supplied_power, Some(550.0));
    assert_eq!(first.temperature, Some(32.5));
    assert_eq!(first.temperature_high_threshold, Some(60.0));
    assert_eq!(first.fans[0].speed_rpm, Some(8200));

    let second = &snapshot.psus[1];
    assert!(second.presence);
    assert!(!second.powergood);
    assert_eq!(second.voltage, None);
    assert_eq!(second.voltage_high_threshold, None);
    assert_eq!(second.model, "N/A");
}

#[test]
fn test_invalid_threshold_rescanned_end_to_end() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());
    write(dir.path(), "power/psu1_volt_max", "127998\n");
    write(dir.path(), "fixed_volt_max", "12600\n");

    let mut settings = settings_for(dir.path());
    settings.platform = Some(AFFECTED_PLATFORM.to_string());
    // Stand-in for the sensor re-scan: the driver then reports the real value
    settings.voltage_workaround.command = format!(
        "cp {} {}",
        dir.path().join("fixed_volt_max").display(),
        dir.path().join("power/psu1_volt_max").display()
    );

    let psus = build_psus(&settings, &settings.context());
    assert_eq!(psus[0].get_voltage_high_threshold(), Some(12.6));
}

#[test]
fn test_invalid_threshold_kept_off_allow_list() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());
    write(dir.path(), "power/psu1_volt_max", "127998\n");

    let mut settings = settings_for(dir.path());
    settings.voltage_workaround.command = "false".to_string();

    let psus = build_psus(&settings, &settings.context());
    assert_eq!(psus[0].get_voltage_high_threshold(), Some(127.998));
}

#[test]
fn test_fixed_psu_platform() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "thermal/psu1_pwr_status", "1\n");

    let settings = PsuSettings {
        psu_count: 1,
        fixed_psu: true,
        ..settings_for(dir.path())
    };
    let psus = build_psus(&settings, &settings.context());
    let psu = &psus[0];

    assert!(psu.get_presence());
    assert!(psu.get_powergood_status());
    assert!(!psu.is_replaceable());
    assert_eq!(psu.num_fans(), 0);
    assert_eq!(psu.get_voltage(), None);
    assert_eq!(psu.get_serial(), "N/A");
}

#[test]
fn test_settings_file_drives_cli() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());
    let config = dir.path().join("etc/settings.json");
    save_settings(&config, &settings_for(dir.path())).unwrap();
    assert_eq!(load_settings(&config).unwrap().psu_count, 2);

    let cli = Cli::parse_from(["psumon", "--config", config.to_str().unwrap(), "json", "--compact"]);
    assert_eq!(cli.command_or_default(), Commands::Json { compact: true });

    let mut out = Vec::new();
    app::run_cli(&cli, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);

    let snapshot: SystemSnapshot = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(snapshot.psus.len(), 2);
    assert_eq!(snapshot.psus[0].voltage, Some(12.034));
}

#[test]
fn test_status_text_for_one_psu() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());

    let cli = Cli::parse_from([
        "psumon",
        "--config",
        dir.path().join("missing.json").to_str().unwrap(),
        "--root",
        dir.path().to_str().unwrap(),
        "--platform",
        "x86_64-mlnx_msn2700-r0",
        "status",
        "--index",
        "1",
    ]);
    let mut out = Vec::new();
    app::run_cli(&cli, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Platform: x86_64-mlnx_msn2700-r0"));
    assert!(text.contains("PSU 2 (slot 2)"));
    assert!(text.contains("power good:   no"));
    assert!(!text.contains("PSU 1 ("));
}

#[test]
#[serial]
fn test_platform_from_environment() {
    let dir = TempDir::new().unwrap();
    build_tree(dir.path());
    let settings = PsuSettings {
        platform: None,
        machine_conf: dir.path().join("machine.conf"),
        ..settings_for(dir.path())
    };

    std::env::set_var("PLATFORM", AFFECTED_PLATFORM);
    let ctx = settings.context();
    let snapshot = capture_snapshot(&build_psus(&settings, &ctx), ctx.platform.as_ref());
    std::env::remove_var("PLATFORM");
    assert_eq!(snapshot.platform.as_deref(), Some(AFFECTED_PLATFORM));

    write(dir.path(), "machine.conf", "onie_platform=x86_64-mlnx_msn3800-r0\n");
    assert_eq!(
        ctx.platform.platform_name().as_deref(),
        Some("x86_64-mlnx_msn3800-r0")
    );
}
