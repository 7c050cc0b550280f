use crate::config::Config;
use crate::error::{CoreError, EntityKind};
use crate::policy;
use crate::principal::Principal;
use crate::store::Store;
use crate::types::{
    Audience, CreatePollRequest, OptionTally, Poll, PollOption, PollStatus, PollTally, VoteRequest,
};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// Polls visible to the caller.
pub fn list_polls(store: &dyn Store, principal: &Principal, config: &Config) -> Vec<Poll> {
    policy::visible_polls(principal, store.list_polls(), config)
}

/// Create a poll. Only admins pick the audience; teachers always get students.
pub fn create_poll(
    store: &dyn Store,
    principal: &Principal,
    req: CreatePollRequest,
) -> Result<Poll, CoreError> {
    policy::require_staff(principal)?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    let description = req.description.trim();
    if description.is_empty() {
        return Err(CoreError::Validation("Description is required".to_string()));
    }
    if req.options.len() < MIN_OPTIONS || req.options.len() > MAX_OPTIONS {
        return Err(CoreError::Validation(format!(
            "Polls need between {} and {} options",
            MIN_OPTIONS, MAX_OPTIONS
        )));
    }

    let mut options = Vec::with_capacity(req.options.len());
    for text in &req.options {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation(
                "Poll options cannot be empty".to_string(),
            ));
        }
        options.push(PollOption {
            option_id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            votes: Vec::new(),
        });
    }

    let target_audience = if principal.is_admin() {
        req.target_audience.unwrap_or(Audience::Students)
    } else {
        Audience::Students
    };

    let poll = Poll {
        poll_id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        options,
        created_by: principal.id.clone(),
        created_by_role: principal.role,
        target_audience,
        status: PollStatus::Active,
        created_at: chrono::Utc::now().to_rfc3339(),
        expires_at: req.expires_at,
    };
    store.insert_poll(poll.clone());

    tracing::info!(
        "Poll created: {} (by: {} {})",
        poll.poll_id,
        principal.role,
        principal.id
    );
    Ok(poll)
}

/// Record a vote. A user gets one vote across the whole poll, checked and
/// appended in a single store transaction.
pub fn vote(
    store: &dyn Store,
    principal: &Principal,
    poll_id: &str,
    req: VoteRequest,
) -> Result<Poll, CoreError> {
    let voter = principal.id.clone();
    let option_id = req.option_id;

    let updated = store.update_poll_with(poll_id, &mut |poll| {
        if poll.status == PollStatus::Closed {
            return Err(CoreError::PollClosed);
        }
        if poll
            .options
            .iter()
            .any(|option| option.votes.iter().any(|v| v == &voter))
        {
            return Err(CoreError::AlreadyVoted);
        }
        match poll
            .options
            .iter_mut()
            .find(|option| option.option_id == option_id)
        {
            Some(option) => {
                option.votes.push(voter.clone());
                Ok(())
            }
            None => Err(CoreError::InvalidOption),
        }
    })?;

    tracing::info!("Vote recorded: poll {} (user: {})", poll_id, principal.id);
    Ok(updated)
}

/// Close an active poll. Closed is terminal; repeated closes are rejected.
pub fn close_poll(
    store: &dyn Store,
    principal: &Principal,
    poll_id: &str,
) -> Result<Poll, CoreError> {
    let updated = store.update_poll_with(poll_id, &mut |poll| {
        if !principal.is_admin() && poll.created_by != principal.id {
            return Err(CoreError::Forbidden("Not authorized to close this poll"));
        }
        if poll.status == PollStatus::Closed {
            return Err(CoreError::InvalidState {
                from: PollStatus::Closed.as_str(),
                to: PollStatus::Closed.as_str(),
            });
        }
        poll.status = PollStatus::Closed;
        Ok(())
    })?;

    tracing::info!("Poll closed: {} (by: {})", poll_id, principal.id);
    Ok(updated)
}

/// Tally of a poll the caller may see.
pub fn results(
    store: &dyn Store,
    principal: &Principal,
    config: &Config,
    poll_id: &str,
) -> Result<PollTally, CoreError> {
    let poll = store
        .get_poll(poll_id)
        .ok_or(CoreError::NotFound(EntityKind::Poll))?;
    // Invisible polls read as missing rather than revealing they exist.
    if !policy::can_view_poll(principal, &poll, config) {
        return Err(CoreError::NotFound(EntityKind::Poll));
    }
    Ok(tally(&poll))
}

/// Vote counts with rounded percentages. An empty poll reads as all zeros.
pub fn tally(poll: &Poll) -> PollTally {
    let total: u32 = poll.options.iter().map(|o| o.votes.len() as u32).sum();
    let options = poll
        .options
        .iter()
        .map(|option| {
            let count = option.votes.len() as u32;
            OptionTally {
                option_id: option.option_id.clone(),
                text: option.text.clone(),
                count,
                percent: percent(count, total),
            }
        })
        .collect();

    PollTally {
        poll_id: poll.poll_id.clone(),
        status: poll.status,
        total_votes: total,
        options,
    }
}

fn percent(count: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (count * 100 + total / 2) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Role;

    fn poll_with_votes(votes: &[&[&str]]) -> Poll {
        let options = votes
            .iter()
            .enumerate()
            .map(|(i, voters)| PollOption {
                option_id: format!("o{}", i + 1),
                text: format!("option {}", i + 1),
                votes: voters.iter().map(|v| v.to_string()).collect(),
            })
            .collect();
        Poll {
            poll_id: "p1".to_string(),
            title: "lunch".to_string(),
            description: "pick one".to_string(),
            options,
            created_by: "teach1".to_string(),
            created_by_role: Role::Teacher,
            target_audience: Audience::Students,
            status: PollStatus::Active,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            expires_at: None,
        }
    }

    #[test]
    fn tally_counts_and_percentages() {
        let poll = poll_with_votes(&[&["s1", "s2"], &["s3"]]);
        let tally = tally(&poll);

        assert_eq!(tally.total_votes, 3);
        assert_eq!(tally.options[0].count, 2);
        assert_eq!(tally.options[0].percent, 67); // 66.67 rounds up
        assert_eq!(tally.options[1].percent, 33);
    }

    #[test]
    fn tally_of_empty_poll_is_all_zero() {
        let poll = poll_with_votes(&[&[], &[]]);
        let tally = tally(&poll);

        assert_eq!(tally.total_votes, 0);
        assert!(tally.options.iter().all(|o| o.count == 0 && o.percent == 0));
    }

    #[test]
    fn percentages_stay_within_bounds() {
        let poll = poll_with_votes(&[&["s1"], &["s2"], &["s3"]]);
        for option in tally(&poll).options {
            assert!(option.percent <= 100);
        }
    }
}
