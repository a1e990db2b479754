use std::fmt::Display;

/// Turns a precondition failure into a logged panic with some context
pub trait PanicContext<T> {
    fn or_panic(self, ctx: &str) -> T;
    fn or_panic_with<F, S>(self, f: F) -> T
    where
        S: Display,
        F: FnOnce() -> S;
}

#[track_caller]
#[cold]
#[inline(never)]
fn fail(msg: String) -> ! {
    log::error!("{msg}");
    panic!("{msg}")
}

impl<T, E> PanicContext<T> for Result<T, E>
where
    E: Display,
{
    #[track_caller]
    fn or_panic(self, ctx: &str) -> T {
        match self {
            Ok(t) => t,
            Err(err) => fail(format!("{ctx}: {err}")),
        }
    }

    #[track_caller]
    fn or_panic_with<F, S>(self, f: F) -> T
    where
        S: Display,
        F: FnOnce() -> S,
    {
        match self {
            Ok(t) => t,
            Err(err) => fail(format!("{}: {err}", f())),
        }
    }
}

impl<T> PanicContext<T> for Option<T> {
    #[track_caller]
    fn or_panic(self, ctx: &str) -> T {
        match self {
            Some(t) => t,
            None => fail(ctx.to_string()),
        }
    }

    #[track_caller]
    fn or_panic_with<F, S>(self, f: F) -> T
    where
        S: Display,
        F: FnOnce() -> S,
    {
        match self {
            Some(t) => t,
            None => fail(f().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_values_pass_through() {
        let res: Result<u8, String> = Ok(3);
        assert_eq!(res.or_panic("never"), 3);
        assert_eq!(Some(4).or_panic_with(|| "never"), 4);
    }

    #[test]
    #[should_panic(expected = "Loading scene: bad period")]
    fn test_err_panics_with_context() {
        let res: Result<u8, String> = Err("bad period".to_string());
        res.or_panic("Loading scene");
    }

    #[test]
    #[should_panic(expected = "missing light 7")]
    fn test_none_panics_with_lazy_context() {
        let value: Option<u8> = None;
        value.or_panic_with(|| format!("missing light {}", 7));
    }
}
