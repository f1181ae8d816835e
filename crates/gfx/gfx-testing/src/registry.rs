//! Registered test records

use core::fmt;

use crate::assert::TestResult;
use crate::context::TestContext;
use crate::framebuffer::Framebuffer;

/// Signature of a test body.
pub type TestFn = fn(&mut Framebuffer, &mut TestContext<'_>) -> TestResult;

/// One registered test.
#[derive(Clone, Copy)]
pub struct TestRecord {
    /// Module (or suite) the test belongs to
    pub module: &'static str,
    /// Test name
    pub name: &'static str,
    /// Test body
    pub func: TestFn,
}

impl TestRecord {
    /// `true` if `module::name` contains `filter`.
    pub fn matches(&self, filter: &str) -> bool {
        filter.is_empty() || self.to_string().contains(filter)
    }
}

impl fmt::Display for TestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

impl fmt::Debug for TestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRecord")
            .field("module", &self.module)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered list of tests; run order is registration order.
#[derive(Debug, Default, Clone)]
pub struct TestRegistry {
    records: Vec<TestRecord>,
}

impl TestRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test.
    pub fn register(&mut self, module: &'static str, name: &'static str, func: TestFn) -> &mut Self {
        self.records.push(TestRecord { module, name, func });
        self
    }

    /// All records in registration order
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Number of registered tests
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only tests whose `module::name` contains `filter`.
    pub fn retain_matching(&mut self, filter: &str) {
        self.records.retain(|r| r.matches(filter));
    }
}

/// Register test functions under the current module path.
///
/// ```
/// use gfx_testing::{register_tests, Framebuffer, TestContext, TestRegistry, TestResult};
///
/// fn blank(_fb: &mut Framebuffer, _ctx: &mut TestContext<'_>) -> TestResult {
///     Ok(())
/// }
///
/// let mut registry = TestRegistry::new();
/// register_tests!(registry, blank);
/// assert_eq!(registry.records()[0].name, "blank");
/// ```
#[macro_export]
macro_rules! register_tests {
    ($registry:expr, $($func:ident),+ $(,)?) => {
        $( $registry.register(::core::module_path!(), ::core::stringify!($func), $func); )+
    };
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]
    use super::*;

    fn pass(_: &mut Framebuffer, _: &mut TestContext<'_>) -> TestResult {
        Ok(())
    }

    #[test]
    fn registration_order_is_kept() {
        let mut reg = TestRegistry::new();
        reg.register("geometry", "standardize", pass)
            .register("color", "channels", pass);
        let names: Vec<_> = reg.records().iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["geometry::standardize", "color::channels"]);
    }

    #[test]
    fn filter_matches_full_name() {
        let mut reg = TestRegistry::new();
        reg.register("geometry", "standardize", pass)
            .register("geometry", "center", pass)
            .register("color", "channels", pass);
        reg.retain_matching("geometry::c");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.records()[0].name, "center");
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let mut reg = TestRegistry::new();
        reg.register("a", "b", pass);
        reg.retain_matching("");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn macro_uses_module_path() {
        let mut reg = TestRegistry::new();
        register_tests!(reg, pass);
        assert_eq!(reg.records()[0].module, module_path!());
        assert_eq!(reg.records()[0].name, "pass");
    }
}
