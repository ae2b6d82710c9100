#[cfg(test)]
mod verify {
    use notifyi::language::*;
    use notifyi::parsing::classify;
    use notifyi::parsing::parser::Parser;

    #[test]
    fn public_message() {
        assert_eq!(
            classify("chris: it might not merge nicely that way though unless rebasing"),
            Ok(RoomMessage::Public {
                from: Username("chris"),
                text: "it might not merge nicely that way though unless rebasing".to_string()
            })
        );

        assert_eq!(
            classify("shazow: what's wrong with ptys?"),
            Ok(RoomMessage::Public {
                from: Username("shazow"),
                text: "what's wrong with ptys?".to_string()
            })
        );
    }

    #[test]
    fn public_message_empty() {
        assert_eq!(
            classify("bob:"),
            Ok(RoomMessage::Public {
                from: Username("bob"),
                text: String::new()
            })
        );
    }

    #[test]
    fn joined_and_left() {
        assert_eq!(
            classify(" * gurken joined. (Connected: 12)"),
            Ok(RoomMessage::Join {
                username: Username("gurken"),
                status: ConnectionStatus::Joined
            })
        );

        assert_eq!(
            classify(" * mike left. (After 60 seconds)"),
            Ok(RoomMessage::Join {
                username: Username("mike"),
                status: ConnectionStatus::Left
            })
        );
    }

    #[test]
    fn nick_change() {
        assert_eq!(
            classify(" * bob is now known as alice."),
            Ok(RoomMessage::NickChange {
                from: Username("bob"),
                to: Username("alice")
            })
        );
    }

    #[test]
    fn action_message() {
        assert_eq!(
            classify("** voldyman has flexible moral values"),
            Ok(RoomMessage::Action {
                from: Username("voldyman"),
                text: "has flexible moral values".to_string()
            })
        );
    }

    #[test]
    fn private_message() {
        assert_eq!(
            classify("[PM from Guest91] private message for testing."),
            Ok(RoomMessage::Private {
                from: Username("Guest91"),
                text: "private message for testing.".to_string()
            })
        );
    }

    #[test]
    fn acknowledgements() {
        assert_eq!(
            classify("[voldyman] some complicated, ardous message"),
            Ok(RoomMessage::Acknowledgement {
                username: Username("voldyman"),
                text: "some complicated, ardous message".to_string(),
                kind: AckKind::Public
            })
        );

        assert_eq!(
            classify("[notifyi] /msg chirs parsing is tough"),
            Ok(RoomMessage::Acknowledgement {
                username: Username("notifyi"),
                text: "/msg chirs parsing is tough".to_string(),
                kind: AckKind::Public
            })
        );

        assert_eq!(
            classify("-> [Sent PM to voldyman]"),
            Ok(RoomMessage::Acknowledgement {
                username: Username("voldyman"),
                text: String::new(),
                kind: AckKind::Private
            })
        );
    }

    #[test]
    fn system_message() {
        assert_eq!(
            classify("-> Message rejected: Rate limiting is in effect."),
            Ok(RoomMessage::System {
                text: "Message rejected: Rate limiting is in effect.".to_string()
            })
        );
    }

    #[test]
    fn noise() {
        let line = "random noise without colon or markers";
        assert_eq!(classify(line), Err(ParseFailure { line }));

        let line = "hello world";
        assert_eq!(classify(line), Err(ParseFailure { line }));
    }

    #[test]
    fn deterministic() {
        let lines = [
            "chris: hello",
            " * gurken joined.",
            "** voldyman waves",
            "[PM from a] b",
            "nothing here",
            "",
        ];

        for line in lines {
            assert_eq!(classify(line), classify(line));
        }
    }

    #[test]
    fn info_beats_public() {
        // would be a public message from "left." if the rules ran the
        // other way around
        assert_eq!(
            classify("* left.: something"),
            Err(ParseFailure {
                line: "* left.: something"
            })
        );

        // a star line that doesn't finish as an info line must not fall
        // through into a public message either
        for line in ["* bob: hi", "*bob: hi", "** : hi", "* : joined."] {
            match classify(line) {
                Ok(RoomMessage::Public { .. }) => panic!("{:?} classified as public", line),
                _ => {}
            }
        }

        // "**" begins with "*" but is never an info line
        assert!(matches!(
            classify("** mike left. (After 60 seconds)"),
            Ok(RoomMessage::Action { .. })
        ));
    }

    #[test]
    fn whitespace_collapsed() {
        let lines = [
            "chris:   lots   of\t\tspace   ",
            "**   voldyman   waves    slowly",
            "[PM from bob]    quiet    please   ",
        ];

        for line in lines {
            let message = classify(line).expect("should classify");
            let (_, text) = message
                .speaker()
                .expect("should have a speaker");

            assert_eq!(text, text.trim());
            assert!(!text.contains("  "));
            assert!(!text.contains('\t'));
        }

        assert_eq!(
            classify("chris:   lots   of\t\tspace   "),
            Ok(RoomMessage::Public {
                from: Username("chris"),
                text: "lots of space".to_string()
            })
        );
    }

    #[test]
    fn rules_run_from_line_start() {
        // each rule starts over; the echo rule must see the '[' that the
        // private message rule already looked at
        assert_eq!(
            classify("[PMfrom] x"),
            Ok(RoomMessage::Acknowledgement {
                username: Username("PMfrom"),
                text: "x".to_string(),
                kind: AckKind::Public
            })
        );
    }

    #[test]
    fn reading_rules_directly() {
        let mut input = Parser::new();
        input.initialize("[PM from Guest91] hi");
        assert_eq!(
            input.read_private(),
            Ok(RoomMessage::Private {
                from: Username("Guest91"),
                text: "hi".to_string()
            })
        );
        assert!(input.is_finished());

        input.initialize("[PM from Guest91] hi");
        assert!(input
            .read_public()
            .is_err());
    }
}
