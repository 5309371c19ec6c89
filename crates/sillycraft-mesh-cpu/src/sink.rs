use std::collections::HashMap;

use crate::mesh_build::MeshBuild;

/// Consumer of finished mesh sections. Each call replaces the whole section.
pub trait MeshSink {
    fn replace_section(&mut self, section: u32, mesh: MeshBuild);
}

impl<F: FnMut(u32, MeshBuild)> MeshSink for F {
    #[inline]
    fn replace_section(&mut self, section: u32, mesh: MeshBuild) {
        self(section, mesh)
    }
}

/// In-memory sink keeping the latest mesh per section.
#[derive(Default, Debug)]
pub struct MeshSections {
    pub sections: HashMap<u32, MeshBuild>,
    pub replacements: u64,
}

impl MeshSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section: u32) -> Option<&MeshBuild> {
        self.sections.get(&section)
    }
}

impl MeshSink for MeshSections {
    fn replace_section(&mut self, section: u32, mesh: MeshBuild) {
        self.sections.insert(section, mesh);
        self.replacements += 1;
    }
}
