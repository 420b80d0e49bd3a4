use serde::{Deserialize, Serialize};

use crate::board::{connection::Connection, NetId};

use super::Ratline;

impl_uuid_index!(AirwireId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airwire {
    pub from: Connection,
    pub to: Connection,
    pub net: NetId,
    pub is_air: bool,
}

/// Ids of a replaced airwire generation, handed out again before any new id is minted.
///
/// Which airwire gets which id is arbitrary: an airwire is not guaranteed to keep its id even
/// when its endpoints did not change, reuse only keeps the overall set of ids steady.
#[derive(Debug, Clone, Default)]
pub struct AirwireIdPool {
    ids: Vec<AirwireId>,
}

impl AirwireIdPool {
    pub fn new(ids: impl IntoIterator<Item = AirwireId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn next_id(&mut self) -> AirwireId {
        self.ids.pop().unwrap_or_else(AirwireId::random)
    }
}

pub fn synthesize<'a>(
    ratlines: &'a [Ratline],
    net: NetId,
    pool: &'a mut AirwireIdPool,
) -> impl Iterator<Item = (AirwireId, Airwire)> + 'a {
    ratlines.iter().map(move |ratline| {
        (
            pool.next_id(),
            Airwire {
                from: ratline.from,
                to: ratline.to,
                net,
                is_air: true,
            },
        )
    })
}
