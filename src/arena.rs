//! Chunked arena that owns every vertex of a tree.

use std::mem;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::vec::Vec;

static NEXT_ARENA_ID: AtomicUsize = AtomicUsize::new(1);

fn next_arena_id() -> usize {
    NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)
}

/// A stable identifier for an object stored in a `TypedArena<T>`.
///
/// A handle remembers which arena produced it and the generation of the slot it points to, so a
/// handle from another arena, or one whose object has already been freed, never resolves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    arena_id: usize,
    chunk_index: usize,
    block_index: usize,
    generation: u32,
}

enum Block<T> {
    Occupied(T, u32),
    Vacant(Option<Handle>, u32),
}

/// An allocator for a single type of object, addressed through `Handle`s.
///
/// All objects inside the arena are destroyed when the arena is destroyed. Objects can be freed
/// individually, and freed slots are reused by later allocations. The underlying storage is a list
/// of `Vec` chunks so allocating never moves existing objects.
///
/// # Examples
///
/// ```
/// use ordered_trees::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert_eq!(arena.get(&x), None);
/// ```
pub struct TypedArena<T> {
    id: usize,
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn block(&self, handle: &Handle) -> Option<&Block<T>> {
        if handle.arena_id != self.id {
            return None;
        }
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            id: next_arena_id(),
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert!(arena.contains(&x));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.size == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value, 0));
                Handle {
                    arena_id: self.id,
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                    generation: 0,
                }
            },
            Some(handle) => {
                let slot = &mut self.chunks[handle.chunk_index][handle.block_index];
                let generation = match slot {
                    Block::Vacant(_, generation) => *generation,
                    Block::Occupied(..) => panic!("Expected a vacant block."),
                };
                match mem::replace(slot, Block::Occupied(value, generation)) {
                    Block::Vacant(next_handle, _) => self.head = next_handle,
                    Block::Occupied(..) => unreachable!(),
                }
                Handle { generation, ..handle }
            },
        }
    }

    /// Deallocates an object in the arena and returns it. The slot's generation is bumped so the
    /// freed handle no longer resolves.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not correspond to a live object of this arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.contains(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let next_generation = handle.generation.wrapping_add(1);
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head.take(), next_generation),
        );
        match old_block {
            Block::Vacant(..) => unreachable!(),
            Block::Occupied(value, _) => {
                self.size -= 1;
                self.head = Some(Handle {
                    generation: next_generation,
                    ..*handle
                });
                value
            },
        }
    }

    /// Returns `true` if the handle was produced by this arena and its object is still live.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let mut other = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// other.allocate(0);
    /// assert!(arena.contains(&x));
    /// assert!(!other.contains(&x));
    /// ```
    pub fn contains(&self, handle: &Handle) -> bool {
        match self.block(handle) {
            Some(Block::Occupied(_, generation)) => *generation == handle.generation,
            _ => false,
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does not
    /// correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied(value, generation)) if *generation == handle.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// *arena.get_mut(&x).unwrap() = 3;
    /// assert_eq!(arena[x], 3);
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.contains(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value, _) => Some(value),
            Block::Vacant(..) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of objects stored per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drops every object and gives the arena a fresh identity, so all previously issued handles
    /// stop resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        *self = TypedArena::new(self.chunk_size);
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}
