use remark_client::api::Time;

/// Short human-readable age of `then` as seen at `now`
///
/// Dates in the future (clock skew between the remote and the browser) read as "just now".
pub fn format_relative(then: Time, now: Time) -> String {
    let elapsed = now - then;
    let plural = |n: i64, unit: &str| match n {
        1 => format!("1 {unit} ago"),
        n => format!("{n} {unit}s ago"),
    };
    if elapsed.num_minutes() < 1 {
        String::from("just now")
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 7 {
        plural(elapsed.num_days(), "day")
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}
