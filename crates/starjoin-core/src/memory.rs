//! Resident memory probing.
//!
//! Used to log how much memory the live fact tables occupy at the peak of a
//! repetition. Sampling never influences measurements.

/// Resident set size of this process in bytes, if the platform exposes it.
pub fn resident_set_bytes() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        status.lines().find_map(|line| parse_kib_field(line, "VmRSS:"))
    }

    #[cfg(target_os = "macos")]
    {
        let pid = std::process::id().to_string();
        let output =
            std::process::Command::new("ps").args(["-o", "rss=", "-p", &pid]).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let kib: usize = String::from_utf8_lossy(&output.stdout).trim().parse().ok()?;
        Some(kib * 1024)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Bytes of a `/proc` status line such as `VmRSS:   1234 kB`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_kib_field(line: &str, field: &str) -> Option<usize> {
    let kib: usize = line.strip_prefix(field)?.split_whitespace().next()?.parse().ok()?;
    Some(kib * 1024)
}

/// A point-in-time RSS sample
#[derive(Debug, Clone, Copy)]
pub struct MemoryStats {
    pub rss_bytes: usize,
}

impl MemoryStats {
    /// Sample the current process
    pub fn current() -> Option<Self> {
        resident_set_bytes().map(|rss_bytes| Self { rss_bytes })
    }

    /// RSS in mebibytes
    pub fn rss_mb(&self) -> f64 {
        self.rss_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Format RSS in human-readable form
    pub fn format_rss(&self) -> String {
        format!("{:.2} MB", self.rss_mb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_sample_current_process() {
        let stats = MemoryStats::current().unwrap();
        assert!(stats.rss_bytes > 1024, "implausible RSS: {} bytes", stats.rss_bytes);
    }

    #[test]
    fn test_parse_kib_field() {
        assert_eq!(parse_kib_field("VmRSS:\t  2048 kB", "VmRSS:"), Some(2048 * 1024));
        assert_eq!(parse_kib_field("VmHWM:\t  2048 kB", "VmRSS:"), None);
        assert_eq!(parse_kib_field("VmRSS:", "VmRSS:"), None);
    }

    #[test]
    fn test_format_rss() {
        let stats = MemoryStats { rss_bytes: 3 * 1024 * 1024 };
        assert_eq!(stats.format_rss(), "3.00 MB");
        assert_eq!(stats.rss_mb(), 3.0);
    }
}
