use tracing::{debug, info, instrument, warn};

use crate::errors::{DialectError, HandParseError, ReconcileError, Stage};
use crate::history::{Action, GameDescriptor, HandRecord, PlayerRoster, Pot};
use crate::reconcile;

use super::{Capabilities, Dialect, HandField, ParseWarning};

/// Turns raw hand text into reconciled [`HandRecord`]s for one dialect.
///
/// The parser holds no state between hands. Many hands can be parsed with
/// the same parser, in parallel if the dialect is `Sync`.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use rs_hand_history::history::ActionKind;
/// use rs_hand_history::parser::{Capabilities, HandParser, JsonDialect};
///
/// let parser = HandParser::new(JsonDialect::with_capabilities(Capabilities::all()));
/// let hand = parser
///     .parse(
///         r#"{
///             "hand_id": 1,
///             "players": [
///                 {"name": "SB", "starting_stack": "100", "seat": 1},
///                 {"name": "BB", "starting_stack": "100", "seat": 2}
///             ],
///             "actions": [
///                 {"player": "SB", "kind": "SmallBlind", "amount": "1", "street": "Preflop"},
///                 {"player": "BB", "kind": "BigBlind", "amount": "2", "street": "Preflop"},
///                 {"player": "SB", "kind": "Fold", "amount": "0", "street": "Preflop"}
///             ]
///         }"#,
///     )
///     .unwrap();
///
/// let uncalled = hand.uncalled_bet().unwrap();
/// assert_eq!(uncalled.kind, ActionKind::UncalledBet);
/// assert_eq!(uncalled.player, "BB");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HandParser<D> {
    dialect: D,
}

impl<D: Dialect> HandParser<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Parse and reconcile one hand.
    ///
    /// # Errors
    ///
    /// Fails when the hand id, roster or actions can't be read, when an
    /// action names a player who isn't seated, when fewer than two players
    /// took part, or when reconciliation finds the actions inconsistent.
    /// Other fields fall back to defaults and are listed in
    /// [`HandRecord::warnings`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(site = self.dialect.site(), hand_id = tracing::field::Empty)
    )]
    pub fn parse(&self, text: &str) -> Result<HandRecord, HandParseError> {
        let input = first_line(text);
        let dialect_err = |stage: Stage| {
            let input = input.clone();
            move |source: DialectError| HandParseError::Dialect {
                stage,
                input,
                source,
            }
        };

        let tokens = self
            .dialect
            .tokenize(text)
            .map_err(dialect_err(Stage::Tokenize))?;
        let hand_id = self
            .dialect
            .hand_id(&tokens)
            .map_err(dialect_err(Stage::HandId))?;
        tracing::Span::current().record("hand_id", hand_id);

        let roster = self
            .dialect
            .players(&tokens)
            .map_err(dialect_err(Stage::Players))?;
        if roster.is_empty() {
            return Err(HandParseError::EmptyRoster { input });
        }

        let mut warnings = Vec::new();
        let game = self.game_descriptor(&tokens, &mut warnings);
        let cancelled = recover(
            HandField::Cancelled,
            self.dialect.is_cancelled(&tokens),
            &mut warnings,
        )
        .unwrap_or(false);

        let raw_actions = self
            .dialect
            .actions(&tokens, &roster)
            .map_err(dialect_err(Stage::Actions))?;
        if let Some(source) = raw_actions
            .iter()
            .find_map(|a| roster.require(&a.player).err())
        {
            return Err(HandParseError::Reconcile {
                stage: Stage::Actions,
                input,
                source,
            });
        }

        let capabilities = self.dialect.capabilities();
        let (actions, calculated_pot) = if cancelled {
            debug!("Hand was cancelled, skipping reconciliation");
            let actions = reconcile::normalize_signs(&raw_actions);
            if capabilities.sort_actions {
                (reconcile::sort_actions(&actions), None)
            } else {
                (actions, None)
            }
        } else {
            self.reconcile(&roster, &raw_actions, capabilities)
                .map_err(|(stage, source)| HandParseError::Reconcile {
                    stage,
                    input: input.clone(),
                    source,
                })?
        };

        let roster = reconcile::mark_sitting_out(&roster, &actions);
        let active = roster.num_active();
        if !cancelled && active < 2 {
            return Err(HandParseError::NotEnoughActivePlayers { input, active });
        }

        let game = GameDescriptor {
            limit: reconcile::detect_ante(game.format, &game.limit, &actions),
            ..game
        };

        let pot = match calculated_pot {
            Some(pot) => Some(pot),
            None => recover(
                HandField::Pot,
                self.dialect.reported_pot(&tokens),
                &mut warnings,
            ),
        };

        let community_cards = recover(
            HandField::CommunityCards,
            self.dialect.community_cards(&tokens),
            &mut warnings,
        )
        .unwrap_or_default();
        let run_it_twice_board = if capabilities.supports_run_it_twice {
            recover(
                HandField::RunItTwice,
                self.dialect.run_it_twice_board(&tokens),
                &mut warnings,
            )
        } else {
            None
        };
        let hero_index = self.hero_index(&tokens, &roster, &mut warnings);
        let extra = recover(HandField::Extra, self.dialect.extra(&tokens), &mut warnings)
            .unwrap_or_default();

        let actions = reconcile::assign_action_numbers(&actions);
        debug!(
            num_actions = actions.len(),
            num_warnings = warnings.len(),
            "Parsed hand"
        );

        Ok(HandRecord {
            hand_id,
            roster,
            actions,
            game,
            community_cards,
            run_it_twice_board,
            pot,
            hero_index,
            cancelled,
            extra,
            warnings,
        })
    }

    /// Parse every hand, keeping each hand's failure to itself.
    pub fn parse_batch<'a, I>(&self, hands: I) -> Vec<Result<HandRecord, HandParseError>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let results: Vec<_> = hands.into_iter().map(|text| self.parse(text)).collect();
        log_batch(&results);
        results
    }

    /// Parse every hand across the rayon thread pool. Results keep the
    /// order of `hands`.
    #[cfg(feature = "rayon")]
    pub fn par_parse_batch<S>(&self, hands: &[S]) -> Vec<Result<HandRecord, HandParseError>>
    where
        D: Sync,
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let results: Vec<_> = hands
            .par_iter()
            .map(|text| self.parse(text.as_ref()))
            .collect();
        log_batch(&results);
        results
    }

    /// Run the reconciliation passes in order. The passes a dialect doesn't
    /// need are skipped.
    fn reconcile(
        &self,
        roster: &PlayerRoster,
        raw_actions: &[Action],
        capabilities: Capabilities,
    ) -> Result<(Vec<Action>, Option<Pot>), (Stage, ReconcileError)> {
        let mut actions = reconcile::normalize_signs(raw_actions);

        if capabilities.sort_actions {
            actions = reconcile::sort_actions(&actions);
        }
        if capabilities.adjust_raises {
            actions = self.dialect.adjust_raise_sizes(&actions);
        }
        if capabilities.detect_all_ins {
            actions = reconcile::classify_all_ins(roster, &actions)
                .map_err(|e| (Stage::DetectAllIns, e))?;
        }
        let pot = capabilities
            .calculate_pot
            .then(|| self.dialect.calculate_pot(&actions));
        if capabilities.fix_uncalled_bet {
            actions =
                reconcile::fix_uncalled_bet(&actions).map_err(|e| (Stage::FixUncalledBet, e))?;
        }

        Ok((actions, pot))
    }

    fn game_descriptor(
        &self,
        tokens: &D::Tokens,
        warnings: &mut Vec<ParseWarning>,
    ) -> GameDescriptor {
        let d = &self.dialect;
        GameDescriptor {
            site: d.site().to_string(),
            format: recover(HandField::GameFormat, d.game_format(tokens), warnings)
                .unwrap_or_default(),
            game_type: recover(HandField::GameType, d.game_type(tokens), warnings)
                .unwrap_or_default(),
            limit: recover(HandField::Limit, d.limit(tokens), warnings).unwrap_or_default(),
            table_type: recover(HandField::TableType, d.table_type(tokens), warnings)
                .unwrap_or_default(),
            seat_type: recover(HandField::SeatType, d.seat_type(tokens), warnings)
                .unwrap_or_default(),
            buyin: recover(HandField::Buyin, d.buyin(tokens), warnings),
            table_name: recover(HandField::TableName, d.table_name(tokens), warnings)
                .unwrap_or_default(),
            dealer_button_position: recover(
                HandField::DealerPosition,
                d.dealer_button_position(tokens),
                warnings,
            ),
            start_date: recover(HandField::Date, d.start_date(tokens), warnings),
        }
    }

    fn hero_index(
        &self,
        tokens: &D::Tokens,
        roster: &PlayerRoster,
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<usize> {
        let hero = recover(HandField::Hero, self.dialect.hero_name(tokens), warnings)?;
        let index = roster.index_of(&hero);
        if index.is_none() {
            warn!(%hero, "Hero is not seated in the hand");
            warnings.push(ParseWarning::new(
                HandField::Hero,
                format!("{hero} is not in the roster"),
            ));
        }
        index
    }
}

/// Unwrap a best effort field, turning a failure into a warning.
fn recover<T>(
    field: HandField,
    result: Result<Option<T>, DialectError>,
    warnings: &mut Vec<ParseWarning>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(%field, error = %err, "Using default for field");
            warnings.push(ParseWarning::new(field, err.to_string()));
            None
        }
    }
}

fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn log_batch(results: &[Result<HandRecord, HandParseError>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        total = results.len(),
        parsed = results.len() - failed,
        failed,
        "Parsed batch of hands"
    );
}
