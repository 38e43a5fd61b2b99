//! One convenience method per RPC method.

use transmission_rpc_types::{
    BlocklistSize, Error, FreeSpace, PortTest, RenamedPath, Session, SessionStats, Torrent,
    TorrentAddResponse, TorrentGetResponse, TorrentId,
};

use super::Client;
use crate::request::{self, QueueDirection, TorrentActionKind};
use crate::transport::HttpTransport;

impl<T: HttpTransport> Client<T> {
    async fn torrent_action<I>(&self, kind: TorrentActionKind, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.send(&request::TorrentAction::new(kind, ids))
            .await
            .map(|_| ())
    }

    async fn queue_move<I>(&self, direction: QueueDirection, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.send(&request::QueueMove::new(direction, ids))
            .await
            .map(|_| ())
    }

    /// Starts torrents. No ids means all of them.
    pub async fn torrent_start<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.torrent_action(TorrentActionKind::Start, ids).await
    }

    /// Starts torrents immediately, ignoring the queue.
    pub async fn torrent_start_now<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.torrent_action(TorrentActionKind::StartNow, ids).await
    }

    /// Stops torrents.
    pub async fn torrent_stop<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.torrent_action(TorrentActionKind::Stop, ids).await
    }

    /// Queues torrents for verification.
    pub async fn torrent_verify<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.torrent_action(TorrentActionKind::Verify, ids).await
    }

    /// Asks trackers for more peers.
    pub async fn torrent_reannounce<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.torrent_action(TorrentActionKind::Reannounce, ids).await
    }

    /// Applies a per-torrent change set. An empty change set sends nothing.
    pub async fn torrent_set(&self, request: &request::TorrentSet) -> Result<(), Error> {
        self.send(request).await.map(|_| ())
    }

    /// Fetches every known field of the given torrents.
    pub async fn torrent_get<I>(&self, ids: I) -> Result<Vec<Torrent>, Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        let response = self.send(&request::TorrentGet::new(ids)).await?;
        Ok(response.torrents)
    }

    /// Fetches selected fields of the given torrents.
    pub async fn torrent_get_fields<I, F>(&self, ids: I, fields: F) -> Result<Vec<Torrent>, Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let request = request::TorrentGet::new(ids).with_fields(fields);
        Ok(self.send(&request).await?.torrents)
    }

    /// Runs a prepared `torrent-get`, keeping the `removed` list.
    pub async fn torrent_get_with(
        &self,
        request: &request::TorrentGet,
    ) -> Result<TorrentGetResponse, Error> {
        self.send(request).await
    }

    /// Torrents that changed recently, and the ids of recently removed ones.
    pub async fn torrent_recently_active(&self) -> Result<TorrentGetResponse, Error> {
        self.send(&request::TorrentGet::recently_active()).await
    }

    /// Runs a prepared `torrent-add`.
    pub async fn torrent_add(
        &self,
        request: &request::TorrentAdd,
    ) -> Result<TorrentAddResponse, Error> {
        self.send(request).await
    }

    /// Adds a `.torrent` file by path on the daemon host or by URL.
    pub async fn torrent_add_file(
        &self,
        filename: impl Into<String>,
    ) -> Result<TorrentAddResponse, Error> {
        self.send(&request::TorrentAdd::filename(filename)).await
    }

    /// Adds a magnet link.
    pub async fn torrent_add_magnet(
        &self,
        magnet: impl Into<String>,
    ) -> Result<TorrentAddResponse, Error> {
        self.send(&request::TorrentAdd::filename(magnet)).await
    }

    /// Adds a torrent from `.torrent` file contents.
    pub async fn torrent_add_metainfo(
        &self,
        metainfo: impl Into<Vec<u8>>,
    ) -> Result<TorrentAddResponse, Error> {
        self.send(&request::TorrentAdd::metainfo(metainfo)).await
    }

    /// Removes torrents, optionally with their data.
    pub async fn torrent_remove<I>(&self, ids: I, delete_local_data: bool) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.send(&request::TorrentRemove::new(ids, delete_local_data))
            .await
            .map(|_| ())
    }

    /// Points torrents at a new location, moving the data if `move_data` is set.
    pub async fn torrent_set_location<I>(
        &self,
        ids: I,
        location: impl Into<String>,
        move_data: bool,
    ) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.send(&request::TorrentSetLocation::new(ids, location, move_data))
            .await
            .map(|_| ())
    }

    /// Renames a path inside a single torrent.
    ///
    /// Fails with [`Error::SingleTorrentRequired`] unless `ids` holds exactly one torrent,
    /// and with [`Error::InvalidId`] when that one entry is `recently-active`.
    pub async fn torrent_rename_path<I>(
        &self,
        ids: I,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<RenamedPath, Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.send(&request::TorrentRenamePath::new(ids, path, name))
            .await
    }

    /// Applies a session change set. An empty change set sends nothing.
    pub async fn session_set(&self, request: &request::SessionSet) -> Result<(), Error> {
        self.send(request).await.map(|_| ())
    }

    /// Fetches all session settings.
    pub async fn session_get(&self) -> Result<Session, Error> {
        self.send(&request::SessionGet::new()).await
    }

    /// Fetches selected session settings.
    pub async fn session_get_fields<F>(&self, fields: F) -> Result<Session, Error>
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        self.send(&request::SessionGet::new().with_fields(fields))
            .await
    }

    /// Transfer statistics.
    pub async fn session_stats(&self) -> Result<SessionStats, Error> {
        self.send(&request::SessionStats).await
    }

    /// Shuts the daemon down.
    pub async fn session_close(&self) -> Result<(), Error> {
        self.send(&request::SessionClose).await.map(|_| ())
    }

    /// Reloads the blocklist and returns its new size.
    pub async fn blocklist_update(&self) -> Result<BlocklistSize, Error> {
        self.send(&request::BlocklistUpdate).await
    }

    /// Checks whether the peer port is reachable.
    pub async fn port_test(&self) -> Result<PortTest, Error> {
        self.send(&request::PortTest::new()).await
    }

    /// Moves torrents to the top of the queue.
    pub async fn queue_move_top<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.queue_move(QueueDirection::Top, ids).await
    }

    /// Moves torrents one step up the queue.
    pub async fn queue_move_up<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.queue_move(QueueDirection::Up, ids).await
    }

    /// Moves torrents one step down the queue.
    pub async fn queue_move_down<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.queue_move(QueueDirection::Down, ids).await
    }

    /// Moves torrents to the bottom of the queue.
    pub async fn queue_move_bottom<I>(&self, ids: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<TorrentId>,
    {
        self.queue_move(QueueDirection::Bottom, ids).await
    }

    /// Free space, in bytes, of a directory on the daemon host.
    pub async fn free_space(&self, path: impl Into<String>) -> Result<FreeSpace, Error> {
        self.send(&request::FreeSpace::new(path)).await
    }
}
