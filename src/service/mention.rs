use crate::providers::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MentionError {
    #[error("no argument")]
    NoArgument,
    #[error("too many arguments")]
    TooManyArguments,
    #[error("no user name")]
    NoUserName,
}

/// Extracts the opponent from the slash-command's free text, which
/// must be a single `<@id|name>` mention token as Slack escapes them.
pub fn opponent(text: &str) -> Result<User, MentionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MentionError::NoArgument);
    }
    let mut tokens = trimmed.split_whitespace();
    let token = tokens.next().expect("non-empty after trim");
    if tokens.next().is_some() {
        return Err(MentionError::TooManyArguments);
    }
    parse(token).ok_or(MentionError::NoUserName)
}

fn parse(token: &str) -> Option<User> {
    let start = token.find("<@")?;
    let rest = &token[start + 2..];
    let (id, rest) = rest.split_once('|')?;
    let (name, _) = rest.split_once('>')?;
    Some(User {
        id: id.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_no_argument() {
        assert!(opponent("") == Err(MentionError::NoArgument));
        assert!(opponent("   ") == Err(MentionError::NoArgument));
    }

    #[test]
    fn multiple_tokens_are_too_many_arguments() {
        assert!(opponent("<@U1|alice> <@U2|bob>") == Err(MentionError::TooManyArguments));
        assert!(opponent("hello there") == Err(MentionError::TooManyArguments));
    }

    #[test]
    fn unescaped_text_is_no_user_name() {
        assert!(opponent("@alice") == Err(MentionError::NoUserName));
        assert!(opponent("alice") == Err(MentionError::NoUserName));
        assert!(opponent("<@U1alice>") == Err(MentionError::NoUserName));
    }

    #[test]
    fn well_formed_mention_is_parsed() {
        let user = opponent(" <@U123|alice> ").unwrap();
        assert!(user.id == "U123");
        assert!(user.name == "alice");
    }
}
