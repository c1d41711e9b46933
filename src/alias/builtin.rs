use super::{AliasEntry, AliasGroup};

const YADM_TRACKED: &[&str] = &[
    "~/docs/",
    "~/.config/alacritty/",
    "~/.config/git/",
    "~/.config/helix/",
    "~/.config/homebrew/",
    "~/.config/kitty/",
    "~/.config/lang/",
    "~/.config/npm/",
    "~/.config/nvim/",
    "~/.config/shell/",
    "~/.config/tmux/",
    "~/.config/wezterm/",
    "~/.config/yadm/",
];

fn group(name: &str, aliases: &[(&str, &str)]) -> AliasGroup {
    AliasGroup::new(
        name,
        aliases
            .iter()
            .map(|(name, command)| AliasEntry::new(*name, *command))
            .collect(),
    )
}

pub(super) fn groups() -> Vec<AliasGroup> {
    let yadm_add_tracked = format!("yadm add {}", YADM_TRACKED.join(" "));

    let mut yadm = group(
        "Yadm",
        &[
            ("yb", "yadm bootstrap"),
            ("ys", "yadm status"),
            ("yl", "yadm log"),
            ("yp", "yadm push"),
            ("ypl", "yadm pull"),
            ("ya", "yadm add -u"),
            ("yc", "yadm commit -m"),
        ],
    );
    yadm.aliases.push(AliasEntry::new("yac", yadm_add_tracked));
    yadm.aliases.push(AliasEntry::new("yls", "yadm ls-files ~"));
    yadm.aliases.push(AliasEntry::new("yd", "yadm diff"));

    vec![
        group(
            "General",
            &[
                ("reload", "source ~/.zshrc"),
                ("update-sys", "yadm pull && yadm bootstrap"),
                ("ll", "ls -latr"),
                ("workspace", "cd ~/dev/repos/personal"),
                ("notes", "cd ~/Documents/notes"),
            ],
        ),
        group(
            "Git",
            &[
                ("gs", "git status -uall"),
                ("gl", "git log"),
                ("gp", "git push"),
                ("gpl", "git pull"),
                ("ga", "git add --all"),
                ("gc", "git commit -m"),
                ("gb", "git branch"),
                ("gac", "git add --all && git commit --amend"),
                ("gm", "git checkout main"),
                ("gu", "git branch -u main"),
                ("gr", "git rebase -i"),
                ("gundo", "git restore ."),
            ],
        ),
        yadm,
        group(
            "Pass",
            &[
                ("pas", "pass git status"),
                ("pal", "pass git log"),
                ("pap", "pass git push"),
                ("papl", "pass git pull"),
            ],
        ),
        group(
            "Advent",
            &[
                ("a-build", "./scripts/advent.py build"),
                ("a-run", "./scripts/advent.py run"),
                ("a-gen", "./scripts/advent.py generate"),
                ("a-graph", "./scripts/advent.py graph"),
            ],
        ),
    ]
}
