use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

pub const QUIET_ENV: &str = "HRDASH_QUIET";

/// Decorative status lines are suppressed when `HRDASH_QUIET` is set
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var(QUIET_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    })
}

fn parse_flag(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}
