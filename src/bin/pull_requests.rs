//! Launcher for the pull_requests delegate binary.

fn main() {
    stagehand::launcher::run("pull_requests")
}
