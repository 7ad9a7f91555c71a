//! 输出字段映射表。
//!
//! 候选路径均相对于报文中的 `status` 对象，按顺序回退。

/// 输出字段的取值方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// 原样取第一个存在的候选值。
    FirstPresent,
    /// bps → Mbps，缺失时为 `0`。
    Megabits,
    /// 数值化；假值或非数值视为无值。
    Uptime,
    /// 秒数 → 可读时长；源值缺失时为无值。
    FriendlyDuration,
}

/// 单个输出字段定义。
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub candidates: &'static [&'static str],
    pub derivation: Derivation,
}

const fn direct(key: &'static str, candidates: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        key,
        candidates,
        derivation: Derivation::FirstPresent,
    }
}

const fn derived(
    key: &'static str,
    candidates: &'static [&'static str],
    derivation: Derivation,
) -> FieldSpec {
    FieldSpec {
        key,
        candidates,
        derivation,
    }
}

/// 身份字段，直接取自报文根（与 `status` 同级）。
pub const IDENTITY_KEYS: [&str; 3] = ["ts", "dish_id", "serial"];

pub const FIELDS: &[FieldSpec] = &[
    direct(
        "stable_connection",
        &["initialization_duration_seconds.stable_connection"],
    ),
    direct("software_update_state", &["software_update_state"]),
    direct("class_of_service", &["class_of_service"]),
    direct("mobility_class", &["mobility_class"]),
    direct("gps_valid", &["gps_stats.gps_valid"]),
    direct("gps_sats", &["gps_stats.gps_sats"]),
    derived(
        "downlink_mbps",
        &["downlink_throughput_bps"],
        Derivation::Megabits,
    ),
    derived(
        "uplink_mbps",
        &["uplink_throughput_bps"],
        Derivation::Megabits,
    ),
    direct("pop_ping_latency_ms", &["pop_ping_latency_ms"]),
    direct("roaming", &["alerts.roaming"]),
    direct("install_pending", &["alerts.install_pending"]),
    direct("eth_speed_mbps", &["eth_speed_mbps"]),
    direct("snr_above_noise_floor", &["is_snr_above_noise_floor"]),
    direct("hardware_version", &["device_info.hardware_version"]),
    direct("software_version", &["device_info.software_version"]),
    direct("generation_number", &["device_info.generation_number"]),
    derived("uptime_s", &["device_state.uptime_s"], Derivation::Uptime),
    direct("bootcount", &["device_info.bootcount"]),
    direct("obstruction_valid_s", &["obstruction_stats.valid_s"]),
    derived(
        "obstruction_valid_friendly",
        &["obstruction_stats.valid_s"],
        Derivation::FriendlyDuration,
    ),
    direct(
        "obstruction_patches_valid",
        &["obstruction_stats.patches_valid"],
    ),
    direct(
        "obstruction_avg_prolonged_interval_s",
        &["obstruction_stats.avg_prolonged_obstruction_interval_s"],
    ),
    direct(
        "boresight_azimuth_deg",
        &[
            "boresight_azimuth_deg",
            "alignment_stats.boresight_azimuth_deg",
        ],
    ),
    direct(
        "boresight_elevation_deg",
        &[
            "boresight_elevation_deg",
            "alignment_stats.boresight_elevation_deg",
        ],
    ),
    direct("tilt_angle_deg", &["alignment_stats.tilt_angle_deg"]),
    direct(
        "attitude_estimation_state",
        &["alignment_stats.attitude_estimation_state"],
    ),
    direct(
        "attitude_uncertainty_deg",
        &["alignment_stats.attitude_uncertainty_deg"],
    ),
    direct(
        "desired_boresight_azimuth_deg",
        &["alignment_stats.desired_boresight_azimuth_deg"],
    ),
    direct(
        "desired_boresight_elevation_deg",
        &["alignment_stats.desired_boresight_elevation_deg"],
    ),
    direct(
        "sw_update_progress",
        &["software_update_stats.software_update_progress"],
    ),
    direct(
        "has_actuators",
        &["has_actuators", "alignment_stats.has_actuators"],
    ),
    direct("disablement_code", &["disablement_code"]),
    direct("has_signed_cals", &["has_signed_cals"]),
    direct("ready_scp", &["ready_states.scp"]),
    direct("ready_l1l2", &["ready_states.l1l2"]),
    direct("ready_xphy", &["ready_states.xphy"]),
    direct("ready_aap", &["ready_states.aap"]),
    direct("ready_rf", &["ready_states.rf"]),
];

/// 输出记录中映射表字段的键（按输出顺序）。
pub fn field_keys() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|field| field.key)
}
