/// Map an internal courier code to the tracking provider's code.
///
/// The mapping is static configuration; an unlisted code means the courier
/// is not supported for tracking.
pub fn provider_code(courier_code: &str) -> Option<&'static str> {
    let code = match courier_code {
        "SF" => "sfexpress",
        "YTO" => "yto",
        "ZTO" => "zto",
        "Yunda" => "yunda",
        "TTKDEX" => "ttkdex",
        "JD" => "jdlogistics",
        "Cainiao" => "cainiao",
        _ => return None,
    };
    Some(code)
}
