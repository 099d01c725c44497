//! Build stamp baked in by build.rs

/// Incremented by build.rs on every recompilation; 0 when unset
pub const BUILD_NUMBER: u64 = match option_env!("PNI_BUILD_NUMBER") {
    Some(s) => match parse_build_number(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

pub const BUILD_TIMESTAMP: &str = match option_env!("PNI_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal digits only; empty or overflowing input yields None
const fn parse_build_number(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = match result.checked_mul(10) {
            Some(n) => match n.checked_add((b - b'0') as u64) {
                Some(n) => n,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(result)
}

/// Version and build stamp reported by intake_status
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    fn banner(&self) -> String {
        format!(
            "Prenatal Intake Assessor v{} (build {}, {})",
            self.version, self.build_number, self.build_timestamp
        )
    }
}

/// One banner line on stderr; stdout carries the MCP stream
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().banner());
}
