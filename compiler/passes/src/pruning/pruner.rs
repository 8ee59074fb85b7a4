// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Mimec library.

// The Mimec library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Mimec library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Mimec library. If not, see <https://www.gnu.org/licenses/>.

use crate::{CompilerState, Pass};

use mimec_ast::{RuleTree, TestId};
use mimec_errors::Result;

use indexmap::IndexSet;

pub struct PruningOutput {
    /// Tests left on a path to an allowed MIME action.
    pub retained: usize,
    /// Tests detached from the tree.
    pub pruned: usize,
}

/// Pass that keeps only tests on a path to a MIME action outside the
/// exception set, marking every survivor active.
///
/// A test whose own MIME is excepted loses the action but survives when a
/// descendant still produces an allowed MIME, so the excepted type can
/// never be emitted.
pub struct Pruning;

impl Pass for Pruning {
    type Input = ();
    type Output = PruningOutput;

    const NAME: &str = "Pruning";

    fn do_pass(_input: Self::Input, state: &mut CompilerState) -> Result<Self::Output> {
        let mut tree = std::mem::take(&mut state.tree);
        let before = tree.len();

        let root = tree.root;
        let any_active = prune(&mut tree, &state.exceptions, root);
        tree.get_mut(root).active = any_active;

        let retained = tree.iter().filter(|test| test.active && !test.is_root()).count();
        state.tree = tree;
        Ok(PruningOutput { retained, pruned: before - retained })
    }
}

/// Prunes the subtests of `id`, returning whether any descendant ended up
/// active.
fn prune(tree: &mut RuleTree, exceptions: &IndexSet<String>, id: TestId) -> bool {
    let subtests = tree.get(id).subtests.clone();
    let mut kept = Vec::with_capacity(subtests.len());
    let mut any_active = false;

    for child in subtests {
        let mime = tree.get(child).set_mime.clone();
        let allowed = mime.as_ref().is_some_and(|m| !exceptions.contains(m));
        let excepted = mime.is_some() && !allowed;

        let active_below = prune(tree, exceptions, child);

        if excepted {
            // The action itself must never fire, but the branch may still
            // carry live descendants.
            tree.get_mut(child).set_mime = None;
        }
        if allowed || active_below {
            tree.get_mut(child).active = true;
            kept.push(child);
            any_active = true;
        }
    }

    tree.get_mut(id).subtests = kept;
    any_active
}

#[cfg(test)]
mod tests {
    use super::*;

    use mimec_ast::Endianness;
    use mimec_errors::emitter::Handler;

    fn state_for(source: &str, exceptions: &[&str]) -> CompilerState {
        let mut state = CompilerState::default();
        state.tree = {
            let (handler, _) = Handler::new_with_buf();
            mimec_parser::parse_rules(&handler, source, Endianness::Little).unwrap()
        };
        state.exceptions = exceptions.iter().map(|e| e.to_string()).collect();
        state
    }

    const RULES: &str = "\
0 string MZ DOS
>0x18 leshort >0x3f PE era
>>4 string X marker
0 string %PDF PDF
!:mime application/pdf
0 string GIF8 GIF
";

    #[test]
    fn test_branches_without_mime_are_dropped() {
        let mut state = state_for(RULES, &[]);
        let output = Pruning::do_pass((), &mut state).unwrap();

        // Only the PDF rule carries a MIME action.
        assert_eq!(output.retained, 1);
        assert_eq!(output.pruned, 4);

        let root = state.tree.root();
        assert_eq!(root.subtests.len(), 1);
        let pdf = state.tree.get(root.subtests[0]);
        assert!(pdf.active);
        assert_eq!(pdf.set_mime.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_exceptions_suppress_the_branch() {
        let mut state = state_for(RULES, &["application/pdf"]);
        let output = Pruning::do_pass((), &mut state).unwrap();

        assert_eq!(output.retained, 0);
        assert!(state.tree.root().subtests.is_empty());
        assert!(!state.tree.root().active);
    }

    #[test]
    fn test_ancestors_of_mime_leaves_stay_active() {
        let source = "\
0 string MZ DOS
>0x18 leshort >0x3f PE era
>>100 string PE\\0\\0 portable executable
!:mime application/x-msdownload
";
        let mut state = state_for(source, &[]);
        let output = Pruning::do_pass((), &mut state).unwrap();

        assert_eq!(output.retained, 3);
        let mz = state.tree.get(state.tree.root().subtests[0]);
        assert!(mz.active && mz.set_mime.is_none());
        let era = state.tree.get(mz.subtests[0]);
        assert!(era.active);
        let pe = state.tree.get(era.subtests[0]);
        assert!(pe.active && pe.set_mime.is_some());
    }

    #[test]
    fn test_excepted_inner_mime_keeps_live_descendants() {
        let source = "\
0 string RIFF resource
!:mime application/x-riff
>8 string WAVE wave audio
!:mime audio/x-wav
";
        let mut state = state_for(source, &["application/x-riff"]);
        let output = Pruning::do_pass((), &mut state).unwrap();

        assert_eq!(output.retained, 2);
        let riff = state.tree.get(state.tree.root().subtests[0]);
        // The excepted action is gone; the branch survives for WAVE.
        assert!(riff.active && riff.set_mime.is_none());
        let wave = state.tree.get(riff.subtests[0]);
        assert_eq!(wave.set_mime.as_deref(), Some("audio/x-wav"));
    }
}
