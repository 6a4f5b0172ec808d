//! Background avatar decoding so large pictures never stall a frame.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::core::avatar::{load_avatar, Avatar, AvatarError};

pub type AvatarUpdate = Result<Avatar, AvatarError>;

pub fn spawn_avatar_load(tx: mpsc::UnboundedSender<AvatarUpdate>, path: PathBuf) {
    std::thread::spawn(move || {
        let result = load_avatar(&path);
        let _ = tx.send(result);
    });
}
