use crate::directory::UserDirectory;
use crate::error::Result;
use log::info;
use qbot_codec::event::UserInfo;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub(crate) async fn rename_loop(
    directory: UserDirectory,
    mut users: mpsc::Receiver<UserInfo>,
    shutdown: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            user = users.recv() => {
                match user {
                    Some(user) => apply(&directory, &user),
                    None => return Ok(()),
                }
            }
            _ = shutdown.cancelled() => return Ok(()),
        }
    }
}

fn apply(directory: &UserDirectory, user: &UserInfo) {
    match directory.update(user) {
        None => info!("New user {} cached", user.name),
        Some(old) if old != user.name => info!("User {} renamed to {}", old, user.name),
        Some(_) => {}
    }
}
