use super::*;
use serial_test::serial;

fn clear_all() {
    for var in [
        "WMO_RECOVERY_DELAY_MS",
        "WMO_DISABLE_WIFI_IN_EMERGENCY",
        "WMO_CLIENT_START_MS",
        "WMO_SCAN_ONLY_START_MS",
        "WMO_SOFT_AP_START_MS",
        "WMO_MANAGER_STOP_MS",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn recovery_delay_defaults_to_two_seconds() {
    clear_all();
    assert_eq!(recovery_delay(), Duration::from_millis(2_000));
}

#[test]
#[serial]
fn recovery_delay_clamps_values_above_the_maximum() {
    clear_all();
    std::env::set_var("WMO_RECOVERY_DELAY_MS", "9999");
    assert_eq!(recovery_delay(), max_recovery_delay());
    clear_all();
}

#[test]
#[serial]
fn disable_wifi_in_emergency_defaults_true_and_honors_explicit_false() {
    clear_all();
    assert!(disable_wifi_in_emergency());

    std::env::set_var("WMO_DISABLE_WIFI_IN_EMERGENCY", "0");
    assert!(!disable_wifi_in_emergency());

    std::env::set_var("WMO_DISABLE_WIFI_IN_EMERGENCY", "false");
    assert!(!disable_wifi_in_emergency());

    std::env::set_var("WMO_DISABLE_WIFI_IN_EMERGENCY", "1");
    assert!(disable_wifi_in_emergency());
    clear_all();
}

#[test]
#[serial]
fn manager_start_delays_fall_back_to_distinct_defaults() {
    clear_all();
    assert_eq!(client_start_delay(), Duration::from_millis(150));
    assert_eq!(scan_only_start_delay(), Duration::from_millis(100));
    assert_eq!(soft_ap_start_delay(), Duration::from_millis(200));
    assert_eq!(manager_stop_delay(), Duration::from_millis(50));
}
