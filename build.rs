use time::formatting::Formattable;
use time::macros::format_description;
use time::OffsetDateTime;

/// `var` from the environment if set (reproducible builds), else `now` formatted.
fn stamp(var: &str, now: OffsetDateTime, format: &(impl Formattable + ?Sized)) {
    let value = std::env::var(var)
        .ok()
        .or_else(|| now.format(format).ok())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env={var}={value}");
}

fn main() {
    let now = OffsetDateTime::now_utc();
    stamp(
        "KEYRANGE_BUILD_DATE",
        now,
        format_description!("[month repr:short] [day padding:space] [year]"),
    );
    stamp("KEYRANGE_BUILD_TIME", now, format_description!("[hour]:[minute]:[second]"));
}
