// cluster-ops/src/disk_usage/size_units.rs
use log::debug;

const MB_PER_GB: f64 = 1024.0;
const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Converts one docker size token (e.g. `"1.2GB"`, `"1,024MB"`) to gigabytes.
///
/// Suffixes are checked in the order GB, MB, KB and are otherwise
/// case-sensitive, with one exception: lowercase `kB` (how docker prints
/// kilobytes) is also read as KB, where a strict `KB`-only match would count
/// it as 0. Any other unit, or a number that doesn't parse, yields `0.0`
/// rather than an error.
pub fn convert_to_gb(size: &str) -> f64 {
    let size = size.trim().replace(',', "");

    let (number, divisor) = if let Some(n) = size.strip_suffix("GB") {
        (n, 1.0)
    } else if let Some(n) = size.strip_suffix("MB") {
        (n, MB_PER_GB)
    } else if let Some(n) = size.strip_suffix("KB").or_else(|| size.strip_suffix("kB")) {
        (n, KB_PER_GB)
    } else {
        debug!("Unrecognized size unit in '{}', counting as 0 GB", size);
        return 0.0;
    };

    match number.trim().parse::<f64>() {
        Ok(value) => value / divisor,
        Err(e) => {
            debug!("Could not parse numeric part of '{}': {}. Counting as 0 GB", size, e);
            0.0
        }
    }
}
