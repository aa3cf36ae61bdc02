//! Shuffle-and-rotate gift assignment.
//!
//! The participants are put into a uniformly random order and each one gives
//! to the next, the last giving to the first. This forms a single cycle over
//! everybody, so nobody draws themselves and everybody gives and receives
//! exactly once.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::error::{DrawError, Result};
use crate::participant::Participant;

/// Smallest group the rotation can serve without self-assignment.
pub const MIN_DRAW_SIZE: usize = 2;

/// One giver -> recipient pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Person buying the gift; they receive the notification.
    pub giver: Participant,
    /// Person the gift is for.
    pub recipient: Participant,
}

impl Assignment {
    /// Creates an assignment.
    #[must_use]
    pub const fn new(giver: Participant, recipient: Participant) -> Self {
        Self { giver, recipient }
    }
}

/// Draws assignments using the thread-local RNG.
///
/// # Errors
///
/// Returns [`DrawError::NoParticipants`] for an empty list and
/// [`DrawError::TooFewParticipants`] for a single participant.
///
/// # Examples
///
/// ```
/// use santa_core::draw::draw;
/// use santa_core::participant::Participant;
///
/// let people = vec![
///     Participant::new("Ana", "5550000001").unwrap(),
///     Participant::new("Beto", "5550000002").unwrap(),
///     Participant::new("Carla", "5550000003").unwrap(),
/// ];
///
/// let assignments = draw(&people).unwrap();
/// assert_eq!(assignments.len(), 3);
/// assert!(assignments.iter().all(|a| a.giver != a.recipient));
/// ```
pub fn draw(participants: &[Participant]) -> Result<Vec<Assignment>> {
    draw_with_rng(participants, &mut rand::thread_rng())
}

/// Draws assignments using the supplied RNG.
///
/// # Errors
///
/// Same as [`draw`].
pub fn draw_with_rng<R>(participants: &[Participant], rng: &mut R) -> Result<Vec<Assignment>>
where
    R: Rng + ?Sized,
{
    check_size(participants.len())?;

    let mut shuffled = participants.to_vec();
    // Fisher-Yates: every ordering is equally likely.
    shuffled.shuffle(rng);
    debug!("Shuffled {} participants", shuffled.len());

    Ok(assign_rotation(shuffled))
}

/// Pairs each participant with the next one, wrapping around at the end.
///
/// The output keeps the input order of givers. With fewer than two
/// participants the result is empty.
///
/// ```
/// use santa_core::draw::assign_rotation;
/// use santa_core::participant::Participant;
///
/// let a = Participant::new("A", "5550000001").unwrap();
/// let b = Participant::new("B", "5550000002").unwrap();
/// let c = Participant::new("C", "5550000003").unwrap();
///
/// let pairs = assign_rotation(vec![a.clone(), b.clone(), c.clone()]);
/// assert_eq!(pairs[0].giver, a);
/// assert_eq!(pairs[0].recipient, b);
/// assert_eq!(pairs[2].giver, c);
/// assert_eq!(pairs[2].recipient, a);
/// ```
#[must_use]
pub fn assign_rotation(ordered: Vec<Participant>) -> Vec<Assignment> {
    if ordered.len() < MIN_DRAW_SIZE {
        return Vec::new();
    }

    let recipients: Vec<Participant> = ordered
        .iter()
        .cycle()
        .skip(1)
        .take(ordered.len())
        .cloned()
        .collect();

    ordered
        .into_iter()
        .zip(recipients)
        .map(|(giver, recipient)| Assignment::new(giver, recipient))
        .collect()
}

fn check_size(len: usize) -> Result<()> {
    match len {
        0 => Err(DrawError::NoParticipants),
        n if n < MIN_DRAW_SIZE => Err(DrawError::TooFewParticipants {
            required: MIN_DRAW_SIZE,
            actual: n,
        }),
        _ => Ok(()),
    }
}
