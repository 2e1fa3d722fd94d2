//! Shared test utilities and fixtures for markup extraction tests

pub mod collector_tests;
pub mod extract_tests;

/// Build a minimal result page around the given results text
pub fn create_test_page(title: &str, address: &str, results: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
<h1>Results</h1>
<address>{address}</address>
<pre>
{results}</pre>
</body>
</html>
"#
    )
}

pub const TEST_RESULTS: &str = "Pos   Bib Name                  Time   Sex      Cat    Cat Pos
1     101 JORDAN FEWER          15:45  M(1/52)  20-29  1(1/12)
";
