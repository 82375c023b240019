/*!
# Graph Storage

The [`Neighborhood`] trait abstracts weighted neighbor lists; [`LabelledGraph`] is the arena graph built on
top of it and [`SharedGraph`] a lock-guarded handle for sharing a graph across threads.
*/

use crate::{ops::*, *};

mod labelled;
mod neighborhood;
mod shared;

pub use labelled::*;
pub use neighborhood::*;
pub use shared::*;
