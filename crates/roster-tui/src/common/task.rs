/// Identifier of one spawned backend call.
///
/// Ids increase monotonically, so a newer request always compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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
    SignIn,
    SignUp,
    LoadUsers,
    AddUser,
    UpdateUser,
    DeleteUser,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
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
    /// Newest id ever begun for this kind; older ids are never re-activated.
    newest: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` as the request whose result will be accepted.
    ///
    /// Called by the reducer when it emits the effect, so a second key press
    /// in the same frame already sees the control as busy.
    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.newest = Some(id);
    }

    /// Confirms a started task. An older id never replaces a newer one.
    pub fn on_started(&mut self, started: &TaskStarted) {
        if self.newest.is_none_or(|newest| newest <= started.id) {
            self.begin(started.id);
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub load_users: TaskState,
    pub add_user: TaskState,
    pub update_user: TaskState,
    pub delete_user: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::LoadUsers => &mut self.load_users,
            TaskKind::AddUser => &mut self.add_user,
            TaskKind::UpdateUser => &mut self.update_user,
            TaskKind::DeleteUser => &mut self.delete_user,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.sign_in.is_running()
            || self.sign_up.is_running()
            || self.load_users.is_running()
            || self.add_user.is_running()
            || self.update_user.is_running()
            || self.delete_user.is_running()
    }
}
