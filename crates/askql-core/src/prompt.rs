//! Prompt assembly for the completion model.

/// Stop sequence passed with every completion request. The model is primed
/// to answer in a `SQLQuery:`/`SQL Result:` transcript style; stopping at
/// the result marker keeps it from inventing rows.
pub const STOP_SEQUENCE: &str = "\nSQL Result:";

/// The fixed instruction block. The Sakila naming example is part of the
/// contract: it steers the model toward the singular `actor` table and the
/// `film_actor` join table that the reference schema actually uses.
const SQL_PROMPT_TEMPLATE: &str = "
You are an SQL generator. Given the following database schema and a natural language question,
provide only the SQL query that answers the question.
Use the table names exactly as provided in the schema.
For example, in the Sakila database, use 'actor' (not 'actors') and 'film_actor' for actor-film relationships.

{schema}

Question: {question}

Return only the SQL query with no additional explanation.
";

/// Render the instruction prompt for one schema snapshot and one question.
///
/// Deterministic substitution; the schema text is embedded untruncated, so
/// an oversized schema is the completion client's problem to reject.
pub fn build_prompt(schema: &str, question: &str) -> String {
    SQL_PROMPT_TEMPLATE
        .replace("{schema}", schema)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_schema_and_question() {
        let prompt = build_prompt(
            "CREATE TABLE actor (actor_id smallint)",
            "Which actor has the most films?",
        );
        assert!(prompt.contains("CREATE TABLE actor (actor_id smallint)"));
        assert!(prompt.contains("Question: Which actor has the most films?"));
        assert!(prompt.contains("Return only the SQL query"));
    }

    #[test]
    fn prompt_keeps_the_naming_example() {
        let prompt = build_prompt("", "");
        assert!(prompt.contains("'actor' (not 'actors')"));
        assert!(prompt.contains("'film_actor'"));
    }

    #[test]
    fn long_schema_is_not_truncated() {
        let schema = "x".repeat(200_000);
        let prompt = build_prompt(&schema, "q");
        assert!(prompt.contains(&schema));
    }

    #[test]
    fn stop_sequence_is_exact() {
        assert_eq!(STOP_SEQUENCE, "\nSQL Result:");
    }

    #[test]
    fn substitution_is_deterministic() {
        let a = build_prompt("s", "q");
        let b = build_prompt("s", "q");
        assert_eq!(a, b);
    }
}
