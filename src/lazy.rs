use crate::cursor::Cursor;
use crate::error::ParseFault;
use crate::parser::{ParseResult, Parser};
use std::borrow::Cow;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// A lazy parser that defers the construction of the actual parser until
/// parse time.
///
/// The factory runs at most once; every clone of a `Lazy` shares the parser it
/// built.
#[derive(Clone)]
pub struct Lazy {
    cell: Rc<LazyCell>,
}

struct LazyCell {
    factory: Box<dyn Fn() -> Parser>,
    parser: OnceCell<Parser>,
}

impl Lazy {
    pub fn new(factory: impl Fn() -> Parser + 'static) -> Self {
        Lazy {
            cell: Rc::new(LazyCell {
                factory: Box::new(factory),
                parser: OnceCell::new(),
            }),
        }
    }

    /// Whether the factory has run yet
    pub fn is_built(&self) -> bool {
        self.cell.parser.get().is_some()
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        self.cell
            .parser
            .get_or_init(|| (self.cell.factory)())
            .parse(cursor)
    }
}

/// Create a lazy parser from a factory function
pub fn lazy(factory: impl Fn() -> Parser + 'static) -> Parser {
    Parser::Lazy(Lazy::new(factory))
}

type RuleFactory = dyn Fn(&Grammar) -> Parser;

struct Slot {
    name: Cow<'static, str>,
    factory: Rc<RuleFactory>,
    parser: Option<Rc<Parser>>,
}

#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    by_name: HashMap<Cow<'static, str>, usize>,
}

/// Named, possibly recursive rules.
///
/// Rules refer to each other through [`Parser::Rule`] handles, which point
/// into the grammar by index and hold only a weak reference to it. Cyclic
/// rules therefore do not keep each other alive; the grammar owns them all.
/// A factory should build its parser from the `&Grammar` it is given rather
/// than from a captured clone, which would be a strong reference.
///
/// Example:
/// ```
/// use backcomb::and::sequence;
/// use backcomb::cursor::Cursor;
/// use backcomb::cursors::StrCursor;
/// use backcomb::lazy::Grammar;
/// use backcomb::utf8::string::literal;
///
/// fn nested(grammar: &Grammar) -> backcomb::parser::Parser {
///     grammar.rule("nested", |g| {
///         sequence([literal("("), nested(g), literal(")")]).or(literal("x"))
///     })
/// }
///
/// let grammar = Grammar::new();
/// let parser = nested(&grammar);
/// let mut cursor = StrCursor::new("((x))");
/// assert!(parser.parse(&mut cursor).unwrap().is_some());
/// assert_eq!(cursor.index(), 5);
/// ```
#[derive(Clone, Default)]
pub struct Grammar {
    arena: Rc<RefCell<Arena>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the rule called `name`.
    ///
    /// The first call for a name registers `factory`; later calls return a
    /// handle to the same rule and ignore their factory.
    pub fn rule(
        &self,
        name: impl Into<Cow<'static, str>>,
        factory: impl Fn(&Grammar) -> Parser + 'static,
    ) -> Parser {
        let name = name.into();
        let mut arena = self.arena.borrow_mut();
        let index = match arena.by_name.get(&name) {
            Some(&index) => index,
            None => {
                let index = arena.slots.len();
                arena.slots.push(Slot {
                    name: name.clone(),
                    factory: Rc::new(factory),
                    parser: None,
                });
                arena.by_name.insert(name.clone(), index);
                index
            }
        };
        Parser::Rule(Rule {
            arena: Rc::downgrade(&self.arena),
            index,
            name,
        })
    }

    /// Handle to an already registered rule
    pub fn get(&self, name: &str) -> Option<Parser> {
        let arena = self.arena.borrow();
        let &index = arena.by_name.get(name)?;
        Some(Parser::Rule(Rule {
            arena: Rc::downgrade(&self.arena),
            index,
            name: arena.slots[index].name.clone(),
        }))
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.arena.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a rule of a [`Grammar`]
#[derive(Clone)]
pub struct Rule {
    arena: Weak<RefCell<Arena>>,
    index: usize,
    name: Cow<'static, str>,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let arena = self
            .arena
            .upgrade()
            .ok_or_else(|| ParseFault::GrammarDropped {
                rule: self.name.clone(),
            })?;
        self.resolve(arena).parse(cursor)
    }

    fn resolve(&self, arena: Rc<RefCell<Arena>>) -> Rc<Parser> {
        let factory = {
            let borrowed = arena.borrow();
            let slot = &borrowed.slots[self.index];
            if let Some(parser) = &slot.parser {
                return parser.clone();
            }
            slot.factory.clone()
        };

        // The arena is not borrowed here, so the factory may register rules
        log::trace!("building rule {}", self.name);
        let grammar = Grammar { arena };
        let parser = Rc::new(factory(&grammar));
        grammar.arena.borrow_mut().slots[self.index]
            .parser
            .get_or_insert(parser)
            .clone()
    }
}
