//! 消息容器、扁平记录与通用点路径写入。

pub mod data;
pub mod path;

pub use data::{FlatRecord, MESSAGE_ID_KEY, Message, PAYLOAD_KEY};
pub use path::{PathError, set_by_path, split_path};
