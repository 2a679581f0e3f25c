//! Integration test common infrastructure.
//!
//! Recording doubles for the collaborators the command layer talks to, and
//! a `Harness` that wires them into a `CommandParser`.

#![allow(dead_code)]

use lanchat::config::TransferConfig;
use lanchat::error::{CommandError, CommandResult};
use lanchat::handlers::{CommandParser, ParserParams};
use lanchat::input::InputRouter;
use lanchat::session::{ChatView, SessionDirectory, SessionFacade, SystemLog};
use lanchat::state::{Topic, User, UserRef};
use lanchat::transfer::{InboundTransfer, OutboundTransfer, TransferId, TransferRegistry};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A facade call as the fake saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GoAway(String),
    ComeBack,
    ChangeTopic(String),
    NotifyAbort {
        user: String,
        id: TransferId,
        file_name: String,
    },
    ChangeNick(String),
    PrivateMessage { to: String, text: String },
    SendFile { to: String, file: PathBuf },
    Chat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ShowTopic,
    ClearChat,
    Quit,
}

pub struct FakeDirectory {
    me: UserRef,
    users: Mutex<Vec<UserRef>>,
    topic: Mutex<Option<Topic>>,
    lookups: Mutex<Vec<String>>,
}

impl SessionDirectory for FakeDirectory {
    fn lookup_user(&self, nick: &str) -> Option<UserRef> {
        self.lookups.lock().push(nick.to_string());
        self.users.lock().iter().find(|u| u.nick() == nick).cloned()
    }

    fn current_user(&self) -> UserRef {
        self.me.clone()
    }

    fn users(&self) -> Vec<UserRef> {
        self.users.lock().clone()
    }

    fn topic(&self) -> Option<Topic> {
        self.topic.lock().clone()
    }
}

/// Records every call; fails them all once `fail_with` is set.
#[derive(Default)]
pub struct FakeSession {
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<String>>,
}

impl FakeSession {
    fn record(&self, call: Call) -> CommandResult {
        self.calls.lock().push(call);
        match self.failure.lock().as_ref() {
            Some(message) => Err(CommandError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl SessionFacade for FakeSession {
    fn go_away(&self, message: &str) -> CommandResult {
        self.record(Call::GoAway(message.to_string()))
    }

    fn come_back(&self) -> CommandResult {
        self.record(Call::ComeBack)
    }

    fn change_topic(&self, text: &str) -> CommandResult {
        self.record(Call::ChangeTopic(text.to_string()))
    }

    fn notify_transfer_abort(&self, user: &UserRef, id: TransferId, file_name: &str) {
        self.calls.lock().push(Call::NotifyAbort {
            user: user.nick(),
            id,
            file_name: file_name.to_string(),
        });
    }

    fn change_nick(&self, nick: &str) -> CommandResult {
        self.record(Call::ChangeNick(nick.to_string()))
    }

    fn send_private_message(&self, user: &UserRef, text: &str) -> CommandResult {
        self.record(Call::PrivateMessage {
            to: user.nick(),
            text: text.to_string(),
        })
    }

    fn send_file(&self, user: &UserRef, file: &Path) -> CommandResult {
        self.record(Call::SendFile {
            to: user.nick(),
            file: file.to_path_buf(),
        })
    }

    fn send_chat_message(&self, text: &str) -> CommandResult {
        self.record(Call::Chat(text.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl SystemLog for RecordingLog {
    fn show_system_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }
}

impl ChatView for RecordingView {
    fn show_topic(&self) {
        self.events.lock().push(ViewEvent::ShowTopic);
    }

    fn clear_chat(&self) {
        self.events.lock().push(ViewEvent::ClearChat);
    }

    fn request_quit(&self) {
        self.events.lock().push(ViewEvent::Quit);
    }
}

/// A parser wired to fakes, with `MySelf` (code 1) as the local user and
/// `SomeOne` (code 2) as a peer.
pub struct Harness {
    pub me: UserRef,
    pub some_one: UserRef,
    pub directory: Arc<FakeDirectory>,
    pub session: Arc<FakeSession>,
    pub log: Arc<RecordingLog>,
    pub view: Arc<RecordingView>,
    pub transfers: Arc<TransferRegistry>,
    pub parser: CommandParser,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(TransferConfig::default())
    }

    pub fn with_settings(settings: TransferConfig) -> Self {
        let me = Arc::new(User::new("MySelf", 1));
        let some_one = Arc::new(User::new("SomeOne", 2));

        let directory = Arc::new(FakeDirectory {
            me: me.clone(),
            users: Mutex::new(vec![me.clone(), some_one.clone()]),
            topic: Mutex::new(None),
            lookups: Mutex::new(Vec::new()),
        });
        let session = Arc::new(FakeSession::default());
        let log = Arc::new(RecordingLog::default());
        let view = Arc::new(RecordingView::default());
        let transfers = Arc::new(TransferRegistry::new());

        let parser = CommandParser::new(ParserParams {
            directory: directory.clone(),
            session: session.clone(),
            log: log.clone(),
            view: view.clone(),
            transfers: transfers.clone(),
            settings,
        });

        Self {
            me,
            some_one,
            directory,
            session,
            log,
            view,
            transfers,
            parser,
        }
    }

    /// An input router over a second parser sharing the same fakes.
    pub fn router(&self) -> InputRouter {
        let parser = CommandParser::new(ParserParams {
            directory: self.directory.clone(),
            session: self.session.clone(),
            log: self.log.clone(),
            view: self.view.clone(),
            transfers: self.transfers.clone(),
            settings: TransferConfig::default(),
        });
        InputRouter::new(parser, self.session.clone(), self.log.clone())
    }

    pub fn parse(&self, line: &str) {
        self.parser.parse(line);
    }

    pub fn add_user(&self, user: UserRef) {
        self.directory.users.lock().push(user);
    }

    pub fn set_topic(&self, topic: Topic) {
        *self.directory.topic.lock() = Some(topic);
    }

    pub fn fail_with(&self, message: &str) {
        *self.session.failure.lock() = Some(message.to_string());
    }

    /// Register an inbound offer of `file` from `SomeOne`.
    pub fn offer_from_some_one(
        &self,
        id: TransferId,
        file: impl Into<PathBuf>,
    ) -> Arc<InboundTransfer> {
        let transfer = Arc::new(InboundTransfer::new(id, self.some_one.clone(), file, 100));
        self.transfers.add_inbound(transfer.clone());
        transfer
    }

    /// Register an outbound offer of `file` to `SomeOne`.
    pub fn offer_to_some_one(
        &self,
        id: TransferId,
        file: impl Into<PathBuf>,
    ) -> Arc<OutboundTransfer> {
        let transfer = Arc::new(OutboundTransfer::new(id, self.some_one.clone(), file, 100));
        self.transfers.add_outbound(transfer.clone());
        transfer
    }

    pub fn messages(&self) -> Vec<String> {
        self.log.messages()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.session.calls.lock().clone()
    }

    pub fn view_events(&self) -> Vec<ViewEvent> {
        self.view.events()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.directory.lookups.lock().clone()
    }

    /// Assert exactly one system message was shown.
    pub fn assert_single_message(&self, expected: &str) {
        assert_eq!(self.messages(), vec![expected.to_string()]);
    }

    /// Assert nothing at all reached the facade, the log or the view.
    pub fn assert_untouched(&self) {
        assert!(self.calls().is_empty(), "facade calls: {:?}", self.calls());
        assert!(self.messages().is_empty(), "messages: {:?}", self.messages());
        assert!(self.view_events().is_empty(), "view: {:?}", self.view_events());
    }
}
