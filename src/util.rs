const FNV1A_OFFSET: u64 = 0xcbf29ce484222325;
const FNV1A_PRIME: u64 = 0x100000001b3;

/// Relation tags are stored snake_cased; this is the form shown to people.
pub fn humanize(tag: &str) -> String {
    tag.replace('_', " ")
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV1A_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV1A_PRIME)
    })
}

/// Maps `id` into [-1, 1]² with a fixed hash, so saved ids land in the same
/// place on every build.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let hash = fnv1a(id.as_bytes());

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}
