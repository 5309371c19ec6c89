use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use sillycraft_mesh_cpu::MeshScratch;

/// Lock-free pool for reusing mesher scratch across worker jobs.
pub struct ScratchPool {
    available_tx: Sender<MeshScratch>,
    available_rx: Receiver<MeshScratch>,
    allocated: AtomicUsize,
    max_scratch: usize,
}

impl ScratchPool {
    pub fn new(max_scratch: usize) -> Self {
        let max_scratch = max_scratch.max(1);
        let (tx, rx) = bounded(max_scratch);
        Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_scratch,
        }
    }

    pub fn with_capacity_from_workers(worker_count: usize) -> Arc<Self> {
        Arc::new(Self::new(worker_count.max(1) * 2))
    }

    /// Takes an idle scratch, allocating one while under capacity and
    /// blocking for a release otherwise.
    pub fn acquire(&self) -> PooledScratch<'_> {
        if let Ok(scratch) = self.available_rx.try_recv() {
            return self.wrap(scratch);
        }

        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_scratch {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_scratch {
                    return self.wrap(MeshScratch::new());
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }

            // The pool holds a sender, so this only fails if it is being torn down.
            if let Ok(scratch) = self.available_rx.recv() {
                return self.wrap(scratch);
            }
        }
    }

    fn wrap(&self, scratch: MeshScratch) -> PooledScratch<'_> {
        PooledScratch {
            scratch,
            pool: self,
        }
    }

    fn release(&self, scratch: MeshScratch) {
        let _ = self.available_tx.send(scratch);
    }

    /// Scratches created so far.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Scratches currently parked in the pool.
    pub fn idle(&self) -> usize {
        self.available_rx.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_scratch
    }
}

/// Scratch on loan from a [`ScratchPool`]; returned on drop.
pub struct PooledScratch<'pool> {
    scratch: MeshScratch,
    pool: &'pool ScratchPool,
}

impl Deref for PooledScratch<'_> {
    type Target = MeshScratch;

    fn deref(&self) -> &Self::Target {
        &self.scratch
    }
}

impl DerefMut for PooledScratch<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.scratch
    }
}

impl Drop for PooledScratch<'_> {
    fn drop(&mut self) {
        // An unallocated placeholder is left behind; the real grid goes back to the pool.
        self.pool.release(std::mem::take(&mut self.scratch));
    }
}
