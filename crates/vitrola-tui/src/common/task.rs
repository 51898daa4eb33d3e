use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Signup,
    AlbumFetch,
    Purchase,
    ModalClose,
    CollectionFetch,
    CollectionRemove,
    WalletFetch,
    WalletCredit,
}

impl TaskKind {
    pub const ALL: [TaskKind; 9] = [
        TaskKind::Login,
        TaskKind::Signup,
        TaskKind::AlbumFetch,
        TaskKind::Purchase,
        TaskKind::ModalClose,
        TaskKind::CollectionFetch,
        TaskKind::CollectionRemove,
        TaskKind::WalletFetch,
        TaskKind::WalletCredit,
    ];

    /// Screen-scoped tasks are cancelled when the user leaves the screen.
    pub fn is_screen_scoped(self) -> bool {
        !matches!(self, TaskKind::Login)
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub signup: TaskState,
    pub album_fetch: TaskState,
    pub purchase: TaskState,
    pub modal_close: TaskState,
    pub collection_fetch: TaskState,
    pub collection_remove: TaskState,
    pub wallet_fetch: TaskState,
    pub wallet_credit: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Signup => &self.signup,
            TaskKind::AlbumFetch => &self.album_fetch,
            TaskKind::Purchase => &self.purchase,
            TaskKind::ModalClose => &self.modal_close,
            TaskKind::CollectionFetch => &self.collection_fetch,
            TaskKind::CollectionRemove => &self.collection_remove,
            TaskKind::WalletFetch => &self.wallet_fetch,
            TaskKind::WalletCredit => &self.wallet_credit,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Signup => &mut self.signup,
            TaskKind::AlbumFetch => &mut self.album_fetch,
            TaskKind::Purchase => &mut self.purchase,
            TaskKind::ModalClose => &mut self.modal_close,
            TaskKind::CollectionFetch => &mut self.collection_fetch,
            TaskKind::CollectionRemove => &mut self.collection_remove,
            TaskKind::WalletFetch => &mut self.wallet_fetch,
            TaskKind::WalletCredit => &mut self.wallet_credit,
        }
    }

    pub fn is_any_running(&self) -> bool {
        TaskKind::ALL
            .iter()
            .any(|kind| self.state(*kind).is_running())
    }

    /// Forgets every screen-scoped task so late results are discarded.
    pub fn clear_screen_scoped(&mut self) {
        for kind in TaskKind::ALL {
            if kind.is_screen_scoped() {
                self.state_mut(kind).clear();
            }
        }
    }
}
