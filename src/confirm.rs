// confirm.rs
//
// Yes/no confirmation for destructive operations. The engine only sees
// this trait; the TUI answers it with a modal dialog, tests answer it
// deterministically. A synchronous blocking implementation is acceptable
// to every caller.

pub trait Confirmation {
    fn ask(&mut self, prompt: &str) -> bool;
}

#[cfg(test)]
pub mod fakes {
    use super::Confirmation;

    /// Answers yes and records the prompts it was asked.
    #[derive(Default)]
    pub struct AlwaysConfirm {
        pub prompts: Vec<String>,
    }

    impl Confirmation for AlwaysConfirm {
        fn ask(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            true
        }
    }

    /// Answers no, as if the user dismissed the dialog.
    #[derive(Default)]
    pub struct NeverConfirm {
        pub prompts: Vec<String>,
    }

    impl Confirmation for NeverConfirm {
        fn ask(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            false
        }
    }
}
