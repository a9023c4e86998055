use super::*;
use qbot_codec::event::UserInfo;

const CH: &str = "C1A2B3C";
const WINDOW: Duration = Duration::from_secs(30);

fn commands() -> Commands {
    let directory = UserDirectory::new(&[
        UserInfo::new("U1", "craig"),
        UserInfo::new("U2", "edward"),
        UserInfo::new("U3", "bob"),
    ]);

    Commands::new("B1", "qbot", directory, WINDOW)
}

fn queue(entries: &[(&str, &str)]) -> Queue {
    entries.iter().map(|(id, reason)| Entry::new(id, reason)).collect()
}

fn run(verb: Verb, q: &Queue, actor: &str, args: &str) -> (Queue, String) {
    let (q, n) = commands().execute(verb, q, CH, actor, args);

    assert_eq!(n.recipient, Recipient::Channel(CH.to_string()));

    (q, n.message)
}

#[test]
fn verbs_are_case_insensitive() {
    assert_eq!(Verb::from_word("JOIN"), Some(Verb::Join));
    assert_eq!(Verb::from_word("Drop"), Some(Verb::Done));
    assert_eq!(Verb::from_word("dance"), None);
    assert!(Verb::List.is_private());
    assert!(!Verb::Join.is_private());
}

#[test]
fn join_empty_queue_takes_token() {
    let (q, text) = run(Verb::Join, &Queue::new(), "U1", "Banana");

    assert_eq!(q, queue(&[("U1", "Banana")]));
    assert_eq!(text, "*<@U1|craig> (Banana) now has the token*");
}

#[test]
fn join_positions_and_duplicates() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (q, text) = run(Verb::Join, &start, "U3", "C");
    assert_eq!(q.len(), 3);
    assert_eq!(text, "<@U3|bob> (C) is now 3rd in line");

    let (q, text) = run(Verb::Join, &start, "U2", "B");
    assert_eq!(q, start);
    assert_eq!(text, "");
}

#[test]
fn join_without_reason_is_prompted() {
    let (q, text) = run(Verb::Join, &Queue::new(), "U1", "  ");

    assert!(q.is_empty());
    assert_eq!(text, "<@U1|craig> You must provide a reason for joining");
}

#[test]
fn leave_latest_matching_entry() {
    let start = queue(&[("U2", "X"), ("U1", "Apple"), ("U1", "Apricot")]);

    let (q, text) = run(Verb::Leave, &start, "U1", "Ap");
    assert_eq!(q, queue(&[("U2", "X"), ("U1", "Apple")]));
    assert_eq!(text, "<@U1|craig> (Apricot) has left the queue");

    let (q, text) = run(Verb::Leave, &start, "U1", "Apple");
    assert_eq!(q, queue(&[("U2", "X"), ("U1", "Apricot")]));
    assert_eq!(text, "<@U1|craig> (Apple) has left the queue");
}

#[test]
fn leave_rejections() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (q, text) = run(Verb::Leave, &start, "U1", "");
    assert_eq!(q, start);
    assert_eq!(text, "<@U1|craig> You have the token, did you mean `done` or `drop`?");

    let (_, text) = run(Verb::Leave, &start, "U2", "Z");
    assert_eq!(text, "<@U2|edward> No entry with a reason that starts with 'Z' was found");

    let (_, text) = run(Verb::Leave, &start, "U3", "");
    assert_eq!(text, "<@U3|bob> You are not in the queue");
}

#[test]
fn leave_by_position() {
    let start = queue(&[("U1", "A"), ("U2", "B"), ("U2", "C")]);

    let (q, _) = run(Verb::Leave, &start, "U2", "2");
    assert_eq!(q, queue(&[("U1", "A"), ("U2", "C")]));

    let (q, text) = run(Verb::Leave, &start, "U3", "2");
    assert_eq!(q, start);
    assert_eq!(text, "<@U3|bob> You are not 2nd in line");

    let (_, text) = run(Verb::Leave, &start, "U2", "7");
    assert_eq!(text, "<@U2|edward> That's not a valid position in the queue");
}

#[test]
fn done_by_sole_holder() {
    let (q, text) = run(Verb::Done, &queue(&[("U1", "A")]), "U1", "");

    assert!(q.is_empty());
    assert_eq!(text, "<@U1|craig> (A) has finished with the token\nThe token is up for grabs");
}

#[test]
fn done_passes_token() {
    let (q, text) = run(Verb::Done, &queue(&[("U1", "A"), ("U2", "B")]), "U1", "");

    assert_eq!(q, queue(&[("U2", "B")]));
    assert_eq!(
        text,
        "<@U1|craig> (A) has finished with the token\n*<@U2|edward> (B) now has the token*"
    );
}

#[test]
fn done_rejections() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (q, text) = run(Verb::Done, &start, "U2", "");
    assert_eq!(q, start);
    assert_eq!(text, "<@U2|edward> You cannot be done if you don't have the token");

    let (q, text) = run(Verb::Done, &Queue::new(), "U2", "");
    assert!(q.is_empty());
    assert_eq!(text, "");
}

#[test]
fn yield_swaps_with_next() {
    let (q, text) = run(Verb::Yield, &queue(&[("U1", "A"), ("U2", "B")]), "U1", "");

    assert_eq!(q, queue(&[("U2", "B"), ("U1", "A")]));
    assert_eq!(
        text,
        "<@U1|craig> (A) has yielded the token\n*<@U2|edward> (B) now has the token*"
    );
}

#[test]
fn yield_rejections() {
    let (_, text) = run(Verb::Yield, &queue(&[("U1", "A")]), "U1", "");
    assert_eq!(text, "<@U1|craig> You cannot yield if there is nobody waiting");

    let (_, text) = run(Verb::Yield, &queue(&[("U1", "A"), ("U2", "B")]), "U2", "");
    assert_eq!(text, "<@U2|edward> You cannot yield if you do not have the token");
}

#[test]
fn barge_new_entry() {
    let start = queue(&[("U1", "Banana"), ("U2", "Next")]);

    let (q, text) = run(Verb::Barge, &start, "U3", "Urgent");

    assert_eq!(q, queue(&[("U1", "Banana"), ("U3", "Urgent"), ("U2", "Next")]));
    assert_eq!(
        text,
        "<@U3|bob> (Urgent) barged to the front\n<@U1|craig> (Banana) still has the token"
    );
}

#[test]
fn barge_latest_entry_without_reason() {
    let start = queue(&[("U1", "A"), ("U2", "B"), ("U3", "C"), ("U3", "D")]);

    let (q, _) = run(Verb::Barge, &start, "U3", "");

    assert_eq!(q, queue(&[("U1", "A"), ("U3", "D"), ("U2", "B"), ("U3", "C")]));
}

#[test]
fn barge_by_position() {
    let start = queue(&[("U1", "A"), ("U2", "B"), ("U3", "C"), ("U3", "D")]);

    let (q, _) = run(Verb::Barge, &start, "U3", "3");
    assert_eq!(q, queue(&[("U1", "A"), ("U3", "C"), ("U2", "B"), ("U3", "D")]));

    let (q, text) = run(Verb::Barge, &start, "U3", "2");
    assert_eq!(q, start);
    assert_eq!(text, "<@U3|bob> You are not 2nd in line");
}

#[test]
fn barge_empty_queue_takes_token() {
    let (q, text) = run(Verb::Barge, &Queue::new(), "U1", "Hurry");

    assert_eq!(q, queue(&[("U1", "Hurry")]));
    assert_eq!(text, "*<@U1|craig> (Hurry) now has the token*");
}

#[test]
fn boot_waiting_entry() {
    let start = queue(&[("U1", "A"), ("U2", "B"), ("U2", "C")]);

    let (q, text) = run(Verb::Boot, &start, "U1", "edward");
    assert_eq!(q, queue(&[("U1", "A"), ("U2", "B")]));
    assert_eq!(text, "<@U1|craig> booted <@U2|edward> (C) from the list");

    let (q, _) = run(Verb::Boot, &start, "U1", "<@U2> B");
    assert_eq!(q, queue(&[("U1", "A"), ("U2", "C")]));

    let (q, _) = run(Verb::Boot, &start, "U1", "2 edward");
    assert_eq!(q, queue(&[("U1", "A"), ("U2", "C")]));
}

#[test]
fn boot_rejections() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (q, text) = run(Verb::Boot, &start, "U2", "craig");
    assert_eq!(q, start);
    assert_eq!(text, "<@U2|edward> You must oust the token holder");

    let (_, text) = run(Verb::Boot, &start, "U1", "bob");
    assert_eq!(text, "<@U1|craig> No entry for bob was found");

    let (_, text) = run(Verb::Boot, &start, "U1", "edward Z");
    assert_eq!(
        text,
        "<@U1|craig> No entry for edward with a reason that starts with 'Z' was found"
    );

    let (_, text) = run(Verb::Boot, &start, "U1", "");
    assert_eq!(text, "<@U1|craig> You must specify who you want to boot");
}

#[test]
fn oust_needs_confirmation() {
    let mut cmd = commands();
    let start = queue(&[("U1", "A"), ("U2", "B")]);
    let now = Instant::now();

    let (q, n) = cmd.oust(&start, CH, "U3", "craig", now);
    assert_eq!(q, start);
    assert_eq!(
        n.message,
        "<@U3|bob> Are you sure you want to oust <@U1|craig>?\n(Repeat this command within 30 seconds to confirm)"
    );

    let (q, n) = cmd.oust(&start, CH, "U3", "craig", now + Duration::from_secs(10));
    assert_eq!(q, queue(&[("U2", "B")]));
    assert_eq!(
        n.message,
        "<@U3|bob> ousted <@U1|craig> (A)\n*<@U2|edward> (B) now has the token*"
    );
    assert_eq!(cmd.pending_count(), 0);
}

#[test]
fn oust_confirmation_expires() {
    let mut cmd = commands();
    let start = queue(&[("U1", "A"), ("U2", "B")]);
    let now = Instant::now();

    cmd.oust(&start, CH, "U3", "craig", now);

    let (q, n) = cmd.oust(&start, CH, "U3", "craig", now + Duration::from_secs(31));
    assert_eq!(q, start);
    assert!(n.message.contains("Are you sure"));

    let (q, _) = cmd.oust(&start, CH, "U3", "craig", now + Duration::from_secs(32));
    assert_eq!(q, queue(&[("U2", "B")]));
}

#[test]
fn oust_different_target_restarts() {
    let mut cmd = commands();
    let now = Instant::now();

    cmd.oust(&queue(&[("U1", "A"), ("U2", "B")]), CH, "U3", "craig", now);

    // the holder changed meanwhile
    let changed = queue(&[("U2", "B"), ("U1", "A")]);

    let (q, n) = cmd.oust(&changed, CH, "U3", "edward", now);
    assert_eq!(q, changed);
    assert!(n.message.contains("Are you sure"));

    let (q, n) = cmd.oust(&changed, CH, "U3", "edward", now);
    assert_eq!(q, queue(&[("U1", "A")]));
    assert!(n.message.contains("ousted <@U2|edward> (B)"));
}

#[test]
fn oust_of_other_user_cancels_confirmation() {
    let mut cmd = commands();
    let start = queue(&[("U1", "A"), ("U2", "B")]);
    let now = Instant::now();

    cmd.oust(&start, CH, "U3", "craig", now);

    let (q, n) = cmd.oust(&start, CH, "U3", "edward", now);
    assert_eq!(q, start);
    assert_eq!(n.message, "<@U3|bob> You can only oust the token holder");
    assert_eq!(cmd.pending_count(), 0);

    let (q, n) = cmd.oust(&start, CH, "U3", "craig", now);
    assert_eq!(q, start);
    assert!(n.message.contains("Are you sure"));

    let (q, _) = cmd.oust(&start, CH, "U3", "craig", now);
    assert_eq!(q, queue(&[("U2", "B")]));
}

#[test]
fn oust_last_holder() {
    let mut cmd = commands();
    let start = queue(&[("U1", "A")]);
    let now = Instant::now();

    cmd.oust(&start, CH, "U2", "<@U1>", now);

    let (q, n) = cmd.oust(&start, CH, "U2", "<@U1>", now);
    assert!(q.is_empty());
    assert_eq!(n.message, "<@U2|edward> ousted <@U1|craig> (A)\nThe token is up for grabs");
}

#[test]
fn oust_rejections() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (_, text) = run(Verb::Oust, &start, "U3", "edward");
    assert_eq!(text, "<@U3|bob> You can only oust the token holder");

    let (_, text) = run(Verb::Oust, &start, "U3", "nobody");
    assert_eq!(text, "<@U3|bob> You can only oust the token holder");

    let (_, text) = run(Verb::Oust, &start, "U3", "");
    assert_eq!(text, "<@U3|bob> You must specify who you want to oust");
}

#[test]
fn delegate_waiting_entry() {
    let start = queue(&[("U1", "A"), ("U2", "B"), ("U2", "C")]);

    let (q, text) = run(Verb::Delegate, &start, "U2", "bob B");

    assert_eq!(q, queue(&[("U1", "A"), ("U3", "B"), ("U2", "C")]));
    assert_eq!(text, "<@U2|edward> (B) has delegated to <@U3|bob>");
}

#[test]
fn delegate_active_entry() {
    let (q, text) = run(Verb::Delegate, &queue(&[("U1", "A")]), "U1", "<@U2|edward>");

    assert_eq!(q, queue(&[("U2", "A")]));
    assert_eq!(
        text,
        "<@U1|craig> (A) has delegated to <@U2|edward>\n*<@U2|edward> (A) now has the token*"
    );
}

#[test]
fn delegate_to_bot_is_refused() {
    let waiting = queue(&[("U2", "B"), ("U1", "A")]);

    let (q, text) = run(Verb::Delegate, &waiting, "U1", "qbot");
    assert_eq!(q, waiting);
    assert_eq!(text, "What am I going to do with the token?");

    let active = queue(&[("U1", "A")]);

    let (q, text) = run(Verb::Delegate, &active, "U1", "<@B1>");
    assert_eq!(q, active);
    assert!(text.starts_with("<@U1|craig> (A) has delegated to <@B1|B1>"));
    assert!(text.ends_with("<@B1|B1> (A) has delegated to <@U1|craig>\n*<@U1|craig> (A) now has the token*"));
}

#[test]
fn delegate_rejections() {
    let start = queue(&[("U1", "A")]);

    let (_, text) = run(Verb::Delegate, &start, "U1", "nobody");
    assert_eq!(text, "<@U1|craig> You cannot delegate to nobody because they don't exist");

    let (_, text) = run(Verb::Delegate, &start, "U2", "bob");
    assert_eq!(text, "<@U2|edward> You cannot delegate if you are not in the queue");

    let (_, text) = run(Verb::Delegate, &Queue::new(), "U2", "bob");
    assert_eq!(text, "<@U2|edward> You cannot delegate if you are not in the queue");
}

#[test]
fn replace_own_entry() {
    let start = queue(&[("U2", "I have it"), ("U2", "Second"), ("U1", "Already here")]);

    let (q, text) = run(Verb::Replace, &start, "U1", "3 Banana");

    assert_eq!(q, queue(&[("U2", "I have it"), ("U2", "Second"), ("U1", "Banana")]));
    assert_eq!(text, "<@U1|craig> (Banana) is now 3rd in line");
}

#[test]
fn replace_rejections() {
    let start = queue(&[("U2", "I have it"), ("U1", "Already here")]);

    let (q, text) = run(Verb::Replace, &start, "U1", "1 Banana");
    assert_eq!(q, start);
    assert_eq!(text, "<@U1|craig> Not replacing because <@U2|edward> is 1st in line");

    for args in ["0 Banana", "3 Banana", "Banana"] {
        let (q, text) = run(Verb::Replace, &start, "U1", args);
        assert_eq!(q, start);
        assert_eq!(text, "<@U1|craig> That's not a valid position in the queue");
    }

    let (_, text) = run(Verb::Replace, &start, "U1", "2");
    assert_eq!(text, "<@U1|craig> You must provide a new reason");
}

#[test]
fn success_removes_holder() {
    let (q, text) = run(Verb::Success, &queue(&[("U1", "A"), ("U2", "B")]), "U3", "");

    assert_eq!(q, queue(&[("U2", "B")]));
    assert_eq!(
        text,
        "Received a success notification from <@U3|bob>\n\
         <@U1|craig> (A) has finished with the token\n\
         *<@U2|edward> (B) now has the token*"
    );

    let (q, text) = run(Verb::Success, &Queue::new(), "U3", "");
    assert!(q.is_empty());
    assert_eq!(text, "Received a success notification from <@U3|bob>");
}

#[test]
fn failure_keeps_queue() {
    let start = queue(&[("U1", "A"), ("U2", "B")]);

    let (q, text) = run(Verb::Failure, &start, "U3", "build is red");

    assert_eq!(q, start);
    assert_eq!(
        text,
        "<@U1|craig> <@U2|edward> Received a failure notification from <@U3|bob>: build is red"
    );
}

#[test]
fn list_queue() {
    let (_, text) = run(Verb::List, &queue(&[("U1", "A"), ("U2", "B")]), "U3", "");

    assert_eq!(text, "*1: craig (A) has the token*\n2: edward (B)");
}

#[test]
fn help_goes_to_the_user() {
    let (q, n) = commands().execute(Verb::Help, &Queue::new(), CH, "U3", "");

    assert!(q.is_empty());
    assert_eq!(n.recipient, Recipient::User("U3".to_string()));
    assert!(n.message.starts_with("Address each command to the bot (`qbot: <command>`)"));
    assert!(n.message.contains("`oust <name>`"));
}

#[test]
fn pop_word_trims() {
    assert_eq!(pop_word("one  two three  "), ("one", "two three"));
    assert_eq!(pop_word("single"), ("single", ""));
    assert_eq!(pop_word(""), ("", ""));
}
