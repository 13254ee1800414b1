//! Flattens sessions into one row per user message.

use crate::models::{SampledQuery, SessionRecord};

/// User messages of every session, tagged with their session metadata.
/// Messages from other roles only count towards the session length.
pub fn user_queries(sessions: &[SessionRecord]) -> Vec<SampledQuery> {
    sessions
        .iter()
        .flat_map(|session| {
            let session_id = session.session_id();
            let session_length = session.session_length() as u64;
            let num_user_messages = session.num_user_messages() as u64;

            session
                .messages
                .iter()
                .filter(|message| message.is_user())
                .map(move |message| SampledQuery {
                    session_id: session_id.clone(),
                    query: message.text().map(str::to_string),
                    session_length,
                    num_user_messages,
                })
        })
        .collect()
}
