use crate::timekit::now_local;
use rand::Rng;

/// Order number: `prefix` (default `SN`), local `YYYYMMDDHHMMSS`, then six random digits.
pub fn generate_order_sn(prefix: Option<&str>) -> String {
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!(
        "{}{}{:06}",
        prefix.unwrap_or("SN"),
        now_local().format("%Y%m%d%H%M%S"),
        random
    )
}
