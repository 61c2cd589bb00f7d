//! SQL extraction from raw model output.
//!
//! The model is told to return only a SQL statement, but in practice often
//! wraps it in a Markdown fence and sometimes reaches for plural table
//! names the reference schema does not have. This module undoes both, with
//! plain string operations and no SQL awareness.

/// Isolate the SQL statement from a raw completion.
///
/// If the input contains a block opened by the exact marker ```` ```sql ````,
/// the text strictly between that marker and the following ```` ``` ```` is
/// taken (to end of input when the closing fence is missing); otherwise the
/// whole trimmed input is used. The naming corrections are then applied.
pub fn extract_sql(raw: &str) -> String {
    let body = match raw.split_once("```sql") {
        Some((_, rest)) => rest.split("```").next().unwrap_or(rest),
        None => raw,
    };
    apply_naming_corrections(body.trim())
}

/// Literal naming corrections for the Sakila reference schema.
///
/// Plain substring replacement, applied unconditionally wherever the
/// literals occur — string literals and comments included. The mapping is
/// specific to Sakila's singular table names and is deliberately not a
/// general identifier rewrite; it lives in this one function so a SQL-aware
/// replacement could swap it out without touching the rest of the pipeline.
pub fn apply_naming_corrections(sql: &str) -> String {
    sql.replace("FROM actors", "FROM actor")
        .replace("JOIN roles", "JOIN film_actor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::fenced(
        "Here you go:\n```sql\nSELECT 1\n```\nHope that helps!",
        "SELECT 1"
    )]
    #[case::fenced_no_prose("```sql\nSELECT id FROM film\n```", "SELECT id FROM film")]
    #[case::unterminated_fence("```sql\nSELECT 1", "SELECT 1")]
    #[case::bare_statement("  SELECT 1  ", "SELECT 1")]
    #[case::plain_fence_is_not_a_marker("```\nSELECT 1\n```", "```\nSELECT 1\n```")]
    #[case::empty("", "")]
    fn fence_handling(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(extract_sql(raw), expected);
    }

    #[rstest]
    #[case("SELECT * FROM actors", "SELECT * FROM actor")]
    #[case(
        "SELECT a.name FROM actors a JOIN roles r ON a.id = r.actor_id",
        "SELECT a.name FROM actor a JOIN film_actor r ON a.id = r.actor_id"
    )]
    #[case::inside_comment("-- FROM actors\nSELECT 1", "-- FROM actor\nSELECT 1")]
    #[case::no_match("SELECT * FROM film", "SELECT * FROM film")]
    fn naming_corrections(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(apply_naming_corrections(input), expected);
    }

    #[test]
    fn correction_alters_nothing_else() {
        let input = "SELECT first_name FROM actors WHERE last_name = 'X'";
        let output = apply_naming_corrections(input);
        assert_eq!(output, "SELECT first_name FROM actor WHERE last_name = 'X'");
        // Only the one literal changed; everything around it is intact.
        assert_eq!(output.len() + 1, input.len());
    }

    #[test]
    fn sakila_fenced_reply_end_to_end() {
        let raw = "```sql\nSELECT a.first_name, a.last_name FROM actors a JOIN roles r ON a.actor_id = r.actor_id\n```";
        let sql = extract_sql(raw);
        assert!(sql.contains("FROM actor a"));
        assert!(sql.contains("JOIN film_actor r"));
        assert!(!sql.contains("actors"));
        assert!(!sql.contains("roles"));
    }

    #[test]
    fn first_fenced_pair_wins() {
        let raw = "```sql\nSELECT 1\n```\n```sql\nSELECT 2\n```";
        assert_eq!(extract_sql(raw), "SELECT 1");
    }

    proptest! {
        #[test]
        fn corrections_are_idempotent(input in ".{0,200}") {
            let once = apply_naming_corrections(&input);
            let twice = apply_naming_corrections(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn unfenced_input_round_trips_modulo_corrections(input in "[^`]{0,200}") {
            let expected = apply_naming_corrections(input.trim());
            prop_assert_eq!(extract_sql(&input), expected);
        }
    }
}
