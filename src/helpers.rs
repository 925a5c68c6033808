macro_rules! ensure {
    ($cond: expr, $err: expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
pub(crate) use ensure;

macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}/{}:{}] {} = {}",
            file!(),
            line!(),
            column!(),
            stringify!($e),
            val
        );
        val
    }};
}
pub(crate) use dbg_display;

pub fn f64_rounded_string(val: &f64, precision: usize) -> String {
    let formatted = format!("{val:.precision$}");
    let rounded = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned()
    } else {
        formatted
    };
    match rounded.as_str() {
        "-0" | "" => "0".to_owned(),
        _ => rounded,
    }
}
