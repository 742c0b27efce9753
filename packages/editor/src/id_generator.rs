use crc32fast::Hasher;

/// Generate a diagram seed from its name using CRC32
pub fn get_diagram_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("diagram://") {
        buff = format!("diagram://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for edges and pasted nodes within a diagram
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Diagram seed (CRC32)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_diagram_seed(name),
            count: 0,
        }
    }

    /// Generate next sequential id, e.g. `edge-1a2b3c4d-7`
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
