use crate::transpiler::traits::SqlDialect;

/// Standard syntax: every hook takes the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl SqlDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
