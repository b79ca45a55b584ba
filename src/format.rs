use chrono::Utc;
use rand::Rng;

/// Human-readable order number: `RP-YYYYMMDD-RRR` with a zero-padded random
/// suffix in [0, 999]. Best-effort only; collisions on the same calendar date
/// are possible and uniqueness is not enforced anywhere.
pub fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let random: u32 = rand::thread_rng().gen_range(0..1000);
    format!("RP-{date}-{random:03}")
}

/// Normalize an Indonesian phone number to its `62...` form.
pub fn format_phone_number(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = cleaned.strip_prefix('0') {
        return format!("62{rest}");
    }
    if cleaned.starts_with("62") {
        return cleaned;
    }
    format!("62{cleaned}")
}
