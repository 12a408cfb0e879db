//! Free lists of encoder and decoder contexts shared by every call in the process.
//!
//! A context only carries reusable allocations (scratch buffers, offset and frame stacks).
//! The sink or source a call binds lives in the borrowing [`Encoder`](crate::Encoder) or
//! [`Decoder`](crate::Decoder), so nothing returned to a pool can still point at it.

use crate::constants::{POOL_MAX_IDLE, POOL_MAX_RETAINED_BYTES};
use crate::decoder::DecoderContext;
use crate::encoder::EncoderContext;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Encoder contexts shared by [`encode`](crate::encode) and every [`Encoder`](crate::Encoder).
pub(crate) static ENCODERS: Lazy<Pool<EncoderContext>> = Lazy::new(Pool::default);

/// Decoder contexts shared by [`decode`](crate::decode) and every [`Decoder`](crate::Decoder).
pub(crate) static DECODERS: Lazy<Pool<DecoderContext>> = Lazy::new(Pool::default);

/// State that can be handed from one call to the next.
pub trait Recycle: Default {
    /// Clears everything a previous user left behind, keeping allocations.
    fn reset(&mut self);

    /// Heap bytes currently held by the state.
    fn retained_bytes(&self) -> usize;
}

/// A bounded, lock-protected free list.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
    max_idle: usize,
    max_retained: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new(POOL_MAX_IDLE, POOL_MAX_RETAINED_BYTES)
    }
}

impl<T> Pool<T> {
    /// Creates a pool keeping at most `max_idle` contexts, each holding at most
    /// `max_retained` heap bytes.
    pub fn new(max_idle: usize, max_retained: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            max_retained,
        }
    }

    /// Number of contexts waiting to be reused.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }
}

impl<T: Recycle> Pool<T> {
    /// Hands out a reset context, allocating a fresh one if none is idle.
    pub fn acquire(&self) -> T {
        let recycled = self.idle.lock().pop();
        match recycled {
            Some(mut ctx) => {
                ctx.reset();
                ctx
            }
            None => {
                trace!("allocating fresh codec context");
                T::default()
            }
        }
    }

    /// Returns a context to the pool. Oversized contexts and contexts beyond the idle cap
    /// are dropped.
    pub fn release(&self, mut ctx: T) {
        let retained = ctx.retained_bytes();
        if retained > self.max_retained {
            debug!(retained, limit = self.max_retained, "dropping oversized codec context");
            return;
        }
        ctx.reset();

        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(ctx);
        }
    }
}
