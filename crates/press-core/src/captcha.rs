//! Captcha challenges
//!
//! A small arithmetic challenge keyed by a random ticket. Only a digest of the
//! expected answer is kept; each ticket can be checked once.

use crate::store::CaptchaValidator;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Longest accepted challenge lifetime (one day)
pub const MAX_TTL_SECS: u64 = 86_400;

/// Answer supplied with a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaToken {
    /// Ticket returned when the challenge was issued
    pub ticket: String,
    /// Visitor's answer
    pub answer: String,
}

impl CaptchaToken {
    /// Create a token
    pub fn new(ticket: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            ticket: ticket.into(),
            answer: answer.into(),
        }
    }
}

/// Challenge shown to a visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    pub ticket: Uuid,
    pub question: String,
    pub expires_at: DateTime<Utc>,
}

struct Issued {
    digest: blake3::Hash,
    expires_at: DateTime<Utc>,
}

/// Issues and checks captcha challenges in memory
pub struct CaptchaIssuer {
    ttl: Duration,
    issued: Mutex<HashMap<Uuid, Issued>>,
}

impl CaptchaIssuer {
    /// Create an issuer whose challenges expire after `ttl_secs`
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.min(MAX_TTL_SECS) as i64;
        Self {
            ttl: Duration::seconds(ttl_secs),
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh challenge
    pub fn issue(&self) -> CaptchaChallenge {
        let ticket = Uuid::new_v4();
        let bytes = ticket.as_bytes();
        let (a, b) = (u32::from(bytes[0] % 10) + 1, u32::from(bytes[1] % 10) + 1);
        let expires_at = Utc::now() + self.ttl;

        let mut issued = self.lock();
        let now = Utc::now();
        issued.retain(|_, entry| entry.expires_at > now);
        issued.insert(
            ticket,
            Issued {
                digest: digest(&ticket, &(a + b).to_string()),
                expires_at,
            },
        );
        debug!("Issued captcha {} ({} outstanding)", ticket, issued.len());

        CaptchaChallenge {
            ticket,
            question: format!("{} + {} = ?", a, b),
            expires_at,
        }
    }

    /// Number of challenges not yet consumed
    pub fn outstanding(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Issued>> {
        // a poisoned map only holds digests; keep serving
        self.issued.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    fn answer_for(&self, challenge: &CaptchaChallenge) -> String {
        let (a, b) = challenge
            .question
            .trim_end_matches(" = ?")
            .split_once(" + ")
            .unwrap();
        (a.parse::<u32>().unwrap() + b.parse::<u32>().unwrap()).to_string()
    }
}

impl CaptchaValidator for CaptchaIssuer {
    fn validate(&self, token: &CaptchaToken) -> bool {
        let Ok(ticket) = Uuid::parse_str(token.ticket.trim()) else {
            debug!("Malformed captcha ticket {:?}", token.ticket);
            return false;
        };

        let Some(entry) = self.lock().remove(&ticket) else {
            warn!("Unknown or reused captcha ticket {}", ticket);
            return false;
        };

        entry.expires_at > Utc::now() && entry.digest == digest(&ticket, &token.answer)
    }
}

fn digest(ticket: &Uuid, answer: &str) -> blake3::Hash {
    blake3::hash(format!("{}:{}", ticket, answer.trim()).as_bytes())
}
