/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a public order id: `ORD-<epoch millis>-<9 alphanumeric chars>`.
///
/// Shown to customers and printed on receipts, distinct from the document
/// store's internal record id. Collision probability at storefront scale is
/// negligible and not defended against.
pub fn order_public_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("ORD-{}-{}", now_millis(), suffix)
}

/// Address-book ids are millis-derived strings, matching the keying of the
/// customer's address map.
pub fn address_id() -> String {
    now_millis().to_string()
}

/// Mask a reviewer name for display: first three characters plus `****`.
/// Empty names mask to `****`.
pub fn mask_name(name: &str) -> String {
    if name.is_empty() {
        return "****".to_string();
    }
    let prefix: String = name.chars().take(3).collect();
    format!("{prefix}****")
}

/// Mask a phone number for display: first two and last two digits kept.
pub fn mask_phone(phone: &str) -> String {
    let n = phone.chars().count();
    if n <= 4 {
        return "****".to_string();
    }
    let head: String = phone.chars().take(2).collect();
    let tail: String = phone.chars().skip(n - 2).collect();
    format!("{head}****{tail}")
}
