/// Decide whether `allowed` satisfies a declared license expression.
///
/// Supports single identifiers (`MIT`) and OR-compounds with optional
/// enclosing parentheses (`(MIT OR Apache-2.0)`). Matching is exact and
/// case-sensitive. `None`, empty strings and dangling operands never match.
pub fn is_satisfied(allowed: &str, declared: Option<&str>) -> bool {
    let Some(declared) = declared else {
        return false;
    };

    if declared == allowed {
        return true;
    }

    if declared.is_empty() || !declared.contains("OR") {
        return false;
    }

    let operands = operands(declared);
    if operands.len() < 2 {
        // an identifier that merely contains "OR", e.g. "ORACLE"
        return operands.first().is_some_and(|only| *only == allowed);
    }

    operands
        .into_iter()
        .any(|part| is_satisfied(allowed, Some(part)))
}

/// Split a compound expression into trimmed operands.
///
/// Enclosing parentheses are stripped without checking balance. A dangling
/// `OR` yields an empty operand, so `"MIT OR"` becomes `["MIT", ""]`.
fn operands(expr: &str) -> Vec<&str> {
    let inner = expr.trim_start_matches('(').trim_end_matches(')').trim();
    let mut parts = Vec::new();
    let mut rest = inner;

    if let Some(stripped) = rest.strip_prefix("OR ") {
        parts.push("");
        rest = stripped;
    }

    let dangling = rest.ends_with(" OR") || rest == "OR";
    if dangling {
        rest = rest.strip_suffix("OR").unwrap_or(rest);
    }

    parts.extend(rest.split(" OR ").map(str::trim));
    if dangling {
        parts.push("");
    }
    parts
}
