//! Prompt assembly for the SQL generator.
//!
//! Two messages: a constant system message with the rules, and a user
//! message carrying the schema, the viewer role, and the question. Keeping
//! the variable parts in the user role leans on chat-template boundaries so
//! small models don't mix instructions with input.

use crate::bundle::Role;

/// System message: who the model is and what it must return.
const SYSTEM_PROMPT: &str = "You are an expert SQL query generator for a business \
intelligence system. Generate a single valid SQL query that answers the user's \
question based on the provided schema. Return ONLY the SQL query, without any \
explanations or markdown formatting.";

/// Build the `(system, user)` message pair for the chat endpoint.
pub fn build_messages(schema_text: &str, question: &str, role: Role) -> (String, String) {
    let user = format!(
        "DATABASE SCHEMA:\n{schema_text}\nUSER ROLE: {role}\n\nUSER QUESTION: {question}"
    );
    (SYSTEM_PROMPT.to_string(), user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_schema_role_and_question() {
        let (system, user) = build_messages(
            "Domain: sales\nTable: sales\n",
            "What are the sales by region?",
            Role::Executive,
        );
        assert!(system.contains("ONLY the SQL query"));
        assert!(user.contains("Domain: sales"));
        assert!(user.contains("USER ROLE: Executive"));
        assert!(user.contains("USER QUESTION: What are the sales by region?"));
    }
}
