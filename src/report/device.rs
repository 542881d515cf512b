//! Device and application metadata captured for bug reports.
//!
//! A [`DeviceInfo`] is a one-shot snapshot taken when the report screen is
//! created. It renders two ways: plain text lines for the on-screen
//! diagnostics panel, and a markdown fragment (an HTML table, which GitHub
//! renders) embedded in the issue body.

use std::fmt;

/// Snapshot of device and application metadata.
///
/// Captured once via [`DeviceInfo::capture`] and never mutated afterwards.
/// Fields that cannot be determined on the current platform hold `"unknown"`,
/// `-1` (version code), `0` (SDK version) or `None` (ABI lists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Host application version string (e.g. "1.4.2").
    pub app_version_name: String,
    /// Host application numeric build counter; -1 when the host has none.
    pub app_version_code: i64,
    /// Detailed OS build string (distribution, version, bitness).
    pub os_build_version: String,
    /// User-facing OS version (e.g. "24.04").
    pub os_release_version: String,
    /// Major OS version as an integer; 0 when it cannot be parsed.
    pub sdk_version: u32,
    /// OS build identifier (codename or edition).
    pub build_id: String,
    /// Platform family (e.g. "linux", "macos", "windows").
    pub brand: String,
    /// Platform vendor or distribution name.
    pub manufacturer: String,
    /// Machine hostname.
    pub device_name: String,
    /// CPU architecture (e.g. "x86_64").
    pub model: String,
    /// OS family (e.g. "unix", "windows").
    pub product: String,
    /// Hardware word size description.
    pub hardware_name: String,
    /// Supported ABIs, most preferred first.
    pub supported_abis: Vec<String>,
    /// 32-bit ABIs; `None` when bitness is unknown.
    pub abis_32bit: Option<Vec<String>>,
    /// 64-bit ABIs; `None` when bitness is unknown.
    pub abis_64bit: Option<Vec<String>>,
}

impl DeviceInfo {
    /// Capture a snapshot of the current device and application.
    ///
    /// The application identity comes from the host (it knows its own
    /// version); everything else is read from the OS.
    pub fn capture(app_version_name: &str, app_version_code: i64) -> Self {
        let info = os_info::get();

        let sdk_version = match info.version() {
            os_info::Version::Semantic(major, _, _) => *major as u32,
            _ => 0,
        };

        let build_id = info
            .codename()
            .or_else(|| info.edition())
            .unwrap_or("unknown")
            .to_string();

        let arch = std::env::consts::ARCH.to_string();
        let (abis_32bit, abis_64bit) = match info.bitness() {
            os_info::Bitness::X32 => (Some(vec![arch.clone()]), Some(Vec::new())),
            os_info::Bitness::X64 => (Some(Vec::new()), Some(vec![arch.clone()])),
            _ => (None, None),
        };

        Self {
            app_version_name: app_version_name.to_string(),
            app_version_code,
            os_build_version: info.to_string(),
            os_release_version: info.version().to_string(),
            sdk_version,
            build_id,
            brand: std::env::consts::OS.to_string(),
            manufacturer: info.os_type().to_string(),
            device_name: hostname(),
            model: arch.clone(),
            product: std::env::consts::FAMILY.to_string(),
            hardware_name: info.bitness().to_string(),
            supported_abis: vec![arch],
            abis_32bit,
            abis_64bit,
        }
    }

    /// Render the snapshot as a markdown fragment for the issue body.
    ///
    /// GitHub renders embedded HTML tables, which keeps the label/value
    /// pairs aligned without markdown column escaping.
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("Device info:\n---\n<table>\n");
        for (label, value) in self.rows() {
            md.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", label, value));
        }
        md.push_str("</table>\n");
        md
    }

    /// Label/value rows shared by both serializations.
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("App version", self.app_version_name.clone()),
            ("App version code", self.app_version_code.to_string()),
            ("OS build version", self.os_build_version.clone()),
            ("OS release version", self.os_release_version.clone()),
            ("SDK version", self.sdk_version.to_string()),
            ("Build ID", self.build_id.clone()),
            ("Brand", self.brand.clone()),
            ("Manufacturer", self.manufacturer.clone()),
            ("Device", self.device_name.clone()),
            ("Model", self.model.clone()),
            ("Product", self.product.clone()),
            ("Hardware", self.hardware_name.clone()),
            ("ABIs", format_abi_list(&self.supported_abis)),
        ];
        if let Some(abis) = &self.abis_32bit {
            rows.push(("32-bit ABIs", format_abi_list(abis)));
        }
        if let Some(abis) = &self.abis_64bit {
            rows.push(("64-bit ABIs", format_abi_list(abis)));
        }
        rows
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

/// Format an ABI list the way the panel and the markdown table show it.
fn format_abi_list(abis: &[String]) -> String {
    format!("[{}]", abis.join(", "))
}

/// Best-effort machine hostname from the environment.
fn hostname() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
