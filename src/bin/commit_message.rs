//! Launcher for the commit_message delegate binary.

fn main() {
    stagehand::launcher::run("commit_message")
}
