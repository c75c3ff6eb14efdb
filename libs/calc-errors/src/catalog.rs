//! Static error catalog entries

use crate::problem::Problem;
use http::StatusCode;

/// Static error definition from the catalog
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Same as [`ErrDef::as_problem`], also attaching the request path and trace id.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        crate::finalize(self.as_problem(detail), instance, trace_id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const TEST_DEF: ErrDef = ErrDef {
        status: 422,
        title: "Division By Zero",
        code: "TEST_DIV_ZERO",
        type_url: "https://errors.bigcalc.dev/TEST_DIV_ZERO",
    };

    #[test]
    fn err_def_to_problem_works() {
        let problem = TEST_DEF.as_problem("second operand is zero");
        assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(problem.title, "Division By Zero");
        assert_eq!(problem.detail, "second operand is zero");
        assert_eq!(problem.code, "TEST_DIV_ZERO");
        assert_eq!(problem.type_url, "https://errors.bigcalc.dev/TEST_DIV_ZERO");
    }

    #[test]
    fn with_context_sets_instance_and_trace() {
        let problem = TEST_DEF.with_context("x", "/calc", Some("42".to_owned()));
        assert_eq!(problem.instance, "/calc");
        assert_eq!(problem.trace_id.as_deref(), Some("42"));
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let def = ErrDef {
            status: 1000,
            ..TEST_DEF
        };
        assert_eq!(
            def.as_problem("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
