/// Single-element node in UnionFind
#[derive(Debug, Clone, Copy)]
struct Entry {
	/// the parent of this node. If a node's parent is its own index,
	/// then it is a root.
	parent: u32,
	/// for the root of a connected component, the number of elements
	/// connected to it. For intermediate values, it's not meaningful.
	size: u32,
}

/// Union-find over pixel indices, joined by size with path compression
pub(super) struct UnionFind {
	data: Box<[Entry]>,
}

impl UnionFind {
	/// Create with `len` singleton sets
	pub fn new(len: usize) -> Self {
		let data = (0..len as u32)
			.map(|id| Entry { parent: id, size: 1 })
			.collect();
		Self { data }
	}

	fn find_representative(&self, element: u32) -> u32 {
		// chase down the root
		let mut root = element;
		while self.data[root as usize].parent != root {
			root = self.data[root as usize].parent;
		}
		root
	}

	/// Get set representative, compressing the path on the way
	pub fn get_representative(&mut self, mut element: u32) -> u32 {
		let root = self.find_representative(element);

		// go back and collapse the tree.
		while self.data[element as usize].parent != root {
			element = std::mem::replace(&mut self.data[element as usize].parent, root);
		}
		root
	}

	/// Join the sets of `a` and `b`. Returns false if they were already joined.
	pub fn connect(&mut self, a: u32, b: u32) -> bool {
		let a = self.get_representative(a);
		let b = self.get_representative(b);

		if a == b {
			return false;
		}

		// graft the smaller tree onto the larger one
		let a_size = self.data[a as usize].size;
		let b_size = self.data[b as usize].size;

		if a_size > b_size {
			self.data[b as usize].parent = a;
			self.data[a as usize].size += b_size;
		} else {
			self.data[a as usize].parent = b;
			self.data[b as usize].size += a_size;
		}
		true
	}
}
