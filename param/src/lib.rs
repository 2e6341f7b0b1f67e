//! Tunable internal parameters read from the environment.
//!
//! These back knobs that are useful for experimentation (e.g. disabling the
//! novelty constraint, switching the relaxed-plan tie-break rule) but are not
//! important enough to expose as first-class CLI flags. See `planner::config`
//! for the flags that *are* part of the supported surface.

use once_cell::sync::OnceCell;
use std::str::FromStr;

pub struct EnvParam<T> {
    value: OnceCell<T>,
    env: &'static str,
    default: &'static str,
}

impl<T> EnvParam<T> {
    pub const fn new(env: &'static str, default: &'static str) -> EnvParam<T> {
        EnvParam {
            value: OnceCell::new(),
            env,
            default,
        }
    }
}

impl<T: FromStr> EnvParam<T> {
    fn read_default(&self) -> T {
        T::from_str(self.default).unwrap_or_else(|_| {
            panic!("[planner-param] {}: invalid default value \"{}\"", self.env, self.default)
        })
    }

    /// Reads the parameter, caching it on first access. A present-but-unparsable
    /// environment variable falls back to the default with a warning rather than
    /// failing the whole run over a tuning knob.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.get_ref()
    }

    pub fn get_ref(&self) -> &T {
        self.value.get_or_init(|| match std::env::var(self.env) {
            Ok(raw) => T::from_str(&raw).unwrap_or_else(|_| {
                eprintln!(
                    "[planner-param] WARNING: could not parse \"{raw}\" for {}, using default \"{}\"",
                    self.env, self.default
                );
                self.read_default()
            }),
            Err(_) => self.read_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        static P: EnvParam<u32> = EnvParam::new("PLANNER_TEST_PARAM_UNSET", "7");
        assert_eq!(P.get(), 7);
    }
}
