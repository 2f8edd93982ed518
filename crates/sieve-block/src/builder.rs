//! Incremental statement-block builder.
//!
//! `BlockBuilder` assigns unique names to declared variables, hashes
//! common subexpressions into a reuse table, and — on [`BlockBuilder::to_block`]
//! — performs use-counting followed by single-use inlining via
//! substitution, re-running [`OptimizeVisitor`] after each substitution
//! (spec.md §4.5).

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use sieve_ast::{DeclarationData, DeclarationFlags, Node, Parameter, Rewriter, TypeRef};
use sieve_optimize::{OptimizeVisitor, ParamKey, SubstituteVariableVisitor, UseCounter};

use crate::error::BlockError;
use crate::reuse::ReuseKey;

/// A shared, mutably-borrowed builder: the shape spec.md §6's
/// `BlockBuilder(optimizing, parent?: BlockBuilder)` constructor takes,
/// since a child builder's `has_variable`/reuse lookups walk the parent
/// chain at call time rather than copying it upfront.
pub type SharedBuilder = Rc<RefCell<BlockBuilder>>;

/// Computes a `Declaration`'s normalized initializer key (spec.md §3):
/// the initializer as-is if its type already matches the declared type,
/// `Constant(null, T)` if there is no initializer, or `Convert(init, T)`
/// if the initializer's type differs from the declared type `T`.
#[must_use]
pub fn normalized_initializer(decl: &DeclarationData) -> Node {
    let declared = decl.parameter.static_type();
    match &decl.initializer {
        None => Node::constant_null(declared.clone()),
        Some(init) => {
            if init.static_type() == Some(declared) {
                init.clone()
            } else {
                Node::convert(init.clone(), declared.clone())
            }
        }
    }
}

/// Final, initialized, and not forced distinct by an `_`-prefixed name
/// (spec.md §3: such a name "is never eligible for the reuse table").
fn is_safe_for_reuse(decl: &DeclarationData) -> bool {
    decl.modifiers.contains(DeclarationFlags::FINAL)
        && decl.initializer.is_some()
        && !decl.parameter.name().starts_with('_')
}

/// Incremental builder of a statement block.
#[derive(Debug)]
pub struct BlockBuilder {
    statements: Vec<Node>,
    variables: FxHashSet<String>,
    expression_for_reuse: FxHashMap<ReuseKey, Node>,
    optimizing: bool,
    parent: Option<SharedBuilder>,
}

impl BlockBuilder {
    #[must_use]
    pub fn new(optimizing: bool, parent: Option<SharedBuilder>) -> Self {
        Self {
            statements: Vec::new(),
            variables: FxHashSet::default(),
            expression_for_reuse: FxHashMap::default(),
            optimizing,
            parent,
        }
    }

    /// True up to and including the root of the scope chain.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
            || self.parent.as_ref().is_some_and(|p| p.borrow().has_variable(name))
    }

    /// Appends a raw statement. On a `Declaration`, enforces the
    /// unique-name invariant and updates the reuse table.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::DuplicateVariable`] if the declared name
    /// already exists anywhere in this builder's scope chain. Per spec.md
    /// §7 this is a programmer error in the caller, not a recoverable
    /// condition — callers are expected to `.expect()` rather than retry.
    pub fn add(&mut self, stmt: Node) -> Result<(), BlockError> {
        if let Node::Declaration(decl) = &stmt {
            let name = decl.parameter.name().to_string();
            if self.has_variable(&name) {
                return Err(BlockError::DuplicateVariable { name });
            }
            let _ = self.variables.insert(name);
            if is_safe_for_reuse(decl) {
                let key = ReuseKey(normalized_initializer(decl));
                let _ = self.expression_for_reuse.insert(key, stmt.clone());
            }
        }
        self.statements.push(stmt);
        Ok(())
    }

    /// Finds a unique name, without reserving it. `!optimize` forces an
    /// underscore prefix (unless already present), which both protects the
    /// resulting declaration from single-use inlining and excludes it from
    /// the reuse table (spec.md §3's invariant on `_`-prefixed names).
    ///
    /// This does *not* insert the returned name into `variables` — that
    /// reservation happens only when the name is actually declared, via
    /// [`Self::add`]. Reserving it here too would make `add`'s own
    /// duplicate check reject the very name `new_name` just handed out.
    pub fn new_name(&self, suggestion: &str, optimize: bool) -> String {
        let base =
            if !optimize && !suggestion.starts_with('_') { format!("_{suggestion}") } else { suggestion.to_string() };
        let mut i: u32 = 0;
        loop {
            let candidate = if i == 0 { base.clone() } else { format!("{base}{i}") };
            if !self.has_variable(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    fn lookup_reuse(&self, expr: &Node) -> Option<Node> {
        let key = ReuseKey(expr.clone());
        self.expression_for_reuse
            .get(&key)
            .cloned()
            .or_else(|| self.parent.as_ref().and_then(|p| p.borrow().lookup_reuse(expr)))
    }

    /// If the last statement is a `Goto`/`Return`, rewrites it to a plain
    /// `Statement` — the caller is folding a prior block's result into
    /// this one, and that result now flows through the next `append`ed
    /// expression instead of exiting the function.
    fn fold_trailing_return(&mut self) {
        let Some(Node::Return(r)) = self.statements.last() else { return };
        let replacement = match &r.expression {
            Some(e) => Node::statement(e.clone()),
            None => Node::Empty,
        };
        let last = self.statements.len() - 1;
        self.statements[last] = replacement;
    }

    /// `append(name, expr, optimize)`: see spec.md §4.5.
    pub fn append(&mut self, name: &str, expr: Node, optimize: bool) -> Node {
        self.fold_trailing_return();

        if expr.is_simple() {
            return expr;
        }
        if self.optimizing && optimize {
            if let Some(Node::Declaration(decl)) = self.lookup_reuse(&expr) {
                return Node::parameter(decl.parameter.clone());
            }
        }

        let static_type = expr.static_type().cloned().unwrap_or_else(|| TypeRef::Named(Rc::from("void")));
        let param_name = self.new_name(name, optimize);
        let param = Parameter::new(param_name, static_type);
        let decl = Node::declare(DeclarationFlags::FINAL, param.clone(), Some(expr));
        self.add(decl).expect("new_name guarantees the allocated name is unused");
        Node::parameter(param)
    }

    /// `appendIfNotNull(name, expr?)`.
    pub fn append_if_not_null(&mut self, name: &str, expr: Option<Node>, optimize: bool) -> Option<Node> {
        expr.map(|e| self.append(name, e, optimize))
    }

    /// Splices a built sub-block's statements into this builder,
    /// re-declaring any clashing name under a fresh one and substituting
    /// the old parameter for the new throughout the remainder of the
    /// sub-block. Returns the block's result: the parameter of a trailing
    /// final declaration, the expression of a trailing return, or `None`.
    ///
    /// # Panics
    ///
    /// Panics if `block` is not a [`Node::Block`].
    pub fn append_block(&mut self, block: &Node, optimize: bool) -> Option<Node> {
        self.fold_trailing_return();
        let Node::Block(data) = block else { panic!("append_block requires a Node::Block") };

        let mut renames: FxHashMap<ParamKey, Node> = FxHashMap::default();
        let mut result: Option<Node> = None;

        for raw_stmt in &data.statements {
            let stmt = rename_parameters(raw_stmt, &renames);
            result = match &stmt {
                Node::Declaration(decl) => {
                    if self.has_variable(decl.parameter.name()) {
                        let fresh_name = decl.parameter.name().to_string();
                        let initializer = decl
                            .initializer
                            .clone()
                            .unwrap_or_else(|| Node::constant_null(decl.parameter.static_type().clone()));
                        let replacement = self.append(&fresh_name, initializer, optimize);
                        // `append` may hand back a simple expression (a
                        // constant, or the initializer's own parameter)
                        // instead of minting a fresh `Parameter` — map the
                        // old parameter to whatever it returned, not just
                        // the `Parameter` case, or later references to it
                        // in this sub-block would go unrenamed.
                        let _ = renames.insert(ParamKey(decl.parameter.clone()), replacement.clone());
                        Some(replacement)
                    } else {
                        self.add(stmt.clone()).expect("name checked via has_variable above");
                        Some(Node::parameter(decl.parameter.clone()))
                    }
                }
                Node::Return(r) => r.expression.clone(),
                Node::Empty => None,
                other => {
                    self.statements.push(other.clone());
                    None
                }
            };
        }
        result
    }

    /// Resets all state: statements, declared names, the reuse table, and
    /// use-count scratch state (SPEC_FULL's conservative reading of
    /// spec.md §6's "reset all state").
    pub fn clear(&mut self) {
        self.statements.clear();
        self.variables.clear();
        self.expression_for_reuse.clear();
    }

    /// Runs the two-pass optimize protocol (if `optimizing`) and returns
    /// the final `BlockStatement`.
    pub fn to_block(&mut self) -> Node {
        if !self.optimizing {
            log::trace!("to_block: optimizing disabled, returning statements as-is");
            return Node::block(std::mem::take(&mut self.statements));
        }

        let registered: Vec<Parameter> = self
            .statements
            .iter()
            .filter_map(|stmt| match stmt {
                Node::Declaration(decl) => Some(decl.parameter.clone()),
                _ => None,
            })
            .collect();
        log::trace!("to_block: {} top-level declarations registered for use counting", registered.len());

        let mut counter = UseCounter::new(registered);
        for stmt in &self.statements {
            counter.visit_statement(stmt);
        }

        let mut sub_map: FxHashMap<ParamKey, Node> = FxHashMap::default();
        let mut rebuilt = Vec::with_capacity(self.statements.len());

        for stmt in std::mem::take(&mut self.statements) {
            if let Node::Declaration(decl) = &stmt {
                let mut count = counter.count_of(&decl.parameter);
                if decl.parameter.name().starts_with('_') {
                    // Never drop, never inline. `Node` has no `New`
                    // variant (construction is out of this crate's node
                    // taxonomy), so spec.md's anonymous-class-body count
                    // override never applies here.
                    count = count.max(2);
                }
                match count {
                    0 => log::debug!("to_block: dropping unused declaration '{}'", decl.parameter.name()),
                    1 => {
                        log::debug!("to_block: inlining single-use declaration '{}'", decl.parameter.name());
                        let _ = sub_map.insert(ParamKey(decl.parameter.clone()), normalized_initializer(decl));
                    }
                    _ => push_reoptimized(&mut rebuilt, &stmt, &sub_map),
                }
            } else {
                push_reoptimized(&mut rebuilt, &stmt, &sub_map);
            }
        }

        Node::block(rebuilt)
    }
}

fn push_reoptimized(out: &mut Vec<Node>, stmt: &Node, sub_map: &FxHashMap<ParamKey, Node>) {
    let substituted =
        if sub_map.is_empty() { stmt.clone() } else { SubstituteVariableVisitor::new(sub_map).visit(stmt) };
    let optimized = OptimizeVisitor::new().run(&substituted);
    if !optimized.is_empty() {
        out.push(optimized);
    }
}

/// A plain, unconditional rename used by `append_block`: unlike
/// [`SubstituteVariableVisitor`], there is no l-value guard here, because
/// every declaration this crate constructs is `FINAL` (never reassigned
/// after initialization), so a clashing declaration's old parameter never
/// appears as an assignment target later in the same sub-block — replacing
/// it, whether with a fresh `Parameter` or with `append`'s simple-expression
/// shortcut (a bare constant), is sound in every position it can occur.
fn rename_parameters(node: &Node, renames: &FxHashMap<ParamKey, Node>) -> Node {
    struct Renamer<'a>(&'a FxHashMap<ParamKey, Node>);
    impl Rewriter for Renamer<'_> {
        fn visit_parameter(&mut self, node: &Node) -> Node {
            let Node::Parameter(p) = node else { return node.clone() };
            match self.0.get(&ParamKey(p.clone())) {
                Some(replacement) => replacement.clone(),
                None => node.clone(),
            }
        }
    }
    if renames.is_empty() { node.clone() } else { Renamer(renames).visit(node) }
}
