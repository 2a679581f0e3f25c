use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lanchat::config::TransferConfig;
use lanchat::error::CommandResult;
use lanchat::handlers::{CommandParser, ParserParams};
use lanchat::session::{ChatView, SessionDirectory, SessionFacade, SystemLog};
use lanchat::state::{Topic, User, UserRef};
use lanchat::transfer::{InboundTransfer, TransferId, TransferRegistry};
use std::hint::black_box;
use std::path::Path;
use std::sync::Arc;

// Collaborators that do nothing, so only dispatch and validation are measured.
struct Quiet {
    me: UserRef,
    peer: UserRef,
}

impl SessionDirectory for Quiet {
    fn lookup_user(&self, nick: &str) -> Option<UserRef> {
        [&self.me, &self.peer]
            .into_iter()
            .find(|u| u.nick() == nick)
            .cloned()
    }

    fn current_user(&self) -> UserRef {
        self.me.clone()
    }

    fn users(&self) -> Vec<UserRef> {
        vec![self.me.clone(), self.peer.clone()]
    }

    fn topic(&self) -> Option<Topic> {
        None
    }
}

impl SessionFacade for Quiet {
    fn go_away(&self, _message: &str) -> CommandResult {
        Ok(())
    }

    fn come_back(&self) -> CommandResult {
        Ok(())
    }

    fn change_topic(&self, _text: &str) -> CommandResult {
        Ok(())
    }

    fn notify_transfer_abort(&self, _user: &UserRef, _id: TransferId, _file_name: &str) {}

    fn change_nick(&self, _nick: &str) -> CommandResult {
        Ok(())
    }

    fn send_private_message(&self, _user: &UserRef, _text: &str) -> CommandResult {
        Ok(())
    }

    fn send_file(&self, _user: &UserRef, _file: &Path) -> CommandResult {
        Ok(())
    }

    fn send_chat_message(&self, _text: &str) -> CommandResult {
        Ok(())
    }
}

impl SystemLog for Quiet {
    fn show_system_message(&self, message: &str) {
        black_box(message);
    }
}

impl ChatView for Quiet {
    fn show_topic(&self) {}

    fn clear_chat(&self) {}

    fn request_quit(&self) {}
}

fn parser() -> (CommandParser, Arc<TransferRegistry>, UserRef) {
    let peer = Arc::new(User::new("SomeOne", 2));
    let quiet = Arc::new(Quiet {
        me: Arc::new(User::new("MySelf", 1)),
        peer: peer.clone(),
    });
    let transfers = Arc::new(TransferRegistry::new());

    let parser = CommandParser::new(ParserParams {
        directory: quiet.clone(),
        session: quiet.clone(),
        log: quiet.clone(),
        view: quiet,
        transfers: transfers.clone(),
        settings: TransferConfig::default(),
    });
    (parser, transfers, peer)
}

fn validation_benchmark(c: &mut Criterion) {
    let (parser, _, _) = parser();
    let mut group = c.benchmark_group("validation");
    group.throughput(Throughput::Elements(1));

    for line in [
        "/reject SomeOne",
        "/reject NoUser 1",
        "/receive SomeOne monkey",
        "/cancel SomeOne 1",
    ] {
        group.bench_function(line, |b| b.iter(|| parser.parse(black_box(line))));
    }

    group.finish();
}

fn reject_benchmark(c: &mut Criterion) {
    let (parser, transfers, peer) = parser();
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("reject_offer", |b| {
        b.iter(|| {
            transfers.add_inbound(Arc::new(InboundTransfer::new(
                1,
                peer.clone(),
                "doc.pdf",
                100,
            )));
            parser.parse(black_box("/reject SomeOne 1"));
        })
    });

    group.finish();
}

criterion_group!(benches, validation_benchmark, reject_benchmark);
criterion_main!(benches);
