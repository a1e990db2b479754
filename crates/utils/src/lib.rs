pub mod memo_cache;
pub mod ring_buffer;
