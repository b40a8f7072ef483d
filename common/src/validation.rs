pub const MAX_PLAYER_NAME_LENGTH: usize = 50;

/// Returns the trimmed name if it is acceptable for a score record.
pub fn validate_player_name(name: &str) -> Result<&str, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Player name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_PLAYER_NAME_LENGTH {
        return Err(format!(
            "Player name must be at most {} characters",
            MAX_PLAYER_NAME_LENGTH
        ));
    }
    Ok(trimmed)
}

pub fn validate_score(score: i64) -> Result<(), String> {
    if score < 0 {
        return Err("Score must be non-negative".to_string());
    }
    Ok(())
}
