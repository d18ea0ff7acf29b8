//! Declaration lowering: classes, functions, parameters, and decorators.

use tree_sitter::Node;

use crate::features::lowering::context::LoweringContext;
use crate::shared::models::ast::{
    clean_name, visibility_of, Annotation, Block, Expression, ExpressionStatement,
    MethodDeclaration, SingleVariableDeclaration, Statement, TypeDeclaration,
};
use crate::shared::models::Result;
use crate::shared::utils::tree_sitter::{children, named_children, node_to_span};

/// Base names that mark a class as an enumeration.
const ENUM_BASES: [&str; 6] = ["Enum", "IntEnum", "Flag", "IntFlag", "AutoEnum", "StrEnum"];

impl<'a> LoweringContext<'a> {
    /// Lower a `class` definition, classifying its body into methods,
    /// field assignments, comments, and residual statements.
    pub(crate) fn lower_class(
        &mut self,
        node: &Node,
        annotations: Vec<Annotation>,
    ) -> Result<TypeDeclaration> {
        let span = node_to_span(node);
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();

        let mut superclasses = Vec::new();
        let mut is_abstract = false;
        let mut is_enum = false;
        if let Some(arg_list) = node.child_by_field_name("superclasses") {
            // Detection is textual over whitespace-stripped source, so
            // `metaclass = ABCMeta` and `metaclass=ABCMeta` read the same.
            let compact =
                |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
            let arg_list_text = compact(self.text(&arg_list));
            is_abstract = arg_list_text.contains("metaclass=ABCMeta")
                || arg_list_text.contains("metaclass=abc.ABCMeta");
            for arg in named_children(&arg_list) {
                let arg_text = compact(self.text(&arg));
                if arg_text.contains("metaclass=") {
                    continue;
                }
                if arg_text == "ABC" || arg_text == "abc.ABC" {
                    is_abstract = true;
                }
                if ENUM_BASES.contains(&arg_text.as_str()) || arg_text.ends_with(".Enum") {
                    is_enum = true;
                }
                superclasses.push(arg_text);
            }
        }

        let mut declaration = TypeDeclaration {
            visibility: visibility_of(&name),
            name,
            superclasses,
            is_abstract,
            is_enum,
            methods: Vec::new(),
            assignments: Vec::new(),
            comments: Vec::new(),
            statements: Vec::new(),
            annotations,
            span,
        };

        if let Some(body) = node.child_by_field_name("body") {
            // Every bare string expression in a class body is promoted, not
            // just a leading docstring.
            for child in named_children(&body) {
                if let Some(doc) = self.promote_docstring(&child) {
                    declaration.comments.push(doc);
                    continue;
                }
                self.classify_class_member(&child, &mut declaration)?;
            }
        }

        Ok(declaration)
    }

    fn classify_class_member(
        &mut self,
        node: &Node,
        declaration: &mut TypeDeclaration,
    ) -> Result<()> {
        match self.lower_statement(node)? {
            Some(Statement::Method(method)) => declaration.methods.push(method),
            Some(Statement::Comment(comment)) => declaration.comments.push(comment),
            Some(Statement::Expression(stmt)) => match stmt.expression {
                Expression::Assignment(assignment) => declaration.assignments.push(assignment),
                expression => declaration
                    .statements
                    .push(Statement::Expression(ExpressionStatement {
                        expression,
                        span: stmt.span,
                    })),
            },
            Some(statement) => declaration.statements.push(statement),
            None => {}
        }
        Ok(())
    }

    /// Lower a `def`, splitting off the docstring and inferring the return
    /// type when no annotation is present.
    pub(crate) fn lower_function(
        &mut self,
        node: &Node,
        mut annotations: Vec<Annotation>,
    ) -> Result<MethodDeclaration> {
        let span = node_to_span(node);
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string())
            .unwrap_or_default();

        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.lower_parameters(&params),
            None => Vec::new(),
        };

        let return_type = match node.child_by_field_name("return_type") {
            Some(annotation) => self.text(&annotation).to_string(),
            None => match node.child_by_field_name("body") {
                Some(body) if contains_return(&body) => "object".to_string(),
                _ => "None".to_string(),
            },
        };

        let is_async = children(node)
            .iter()
            .any(|c| !c.is_named() && self.text(c) == "async");
        if is_async {
            annotations.push(Annotation::marker("async", span));
        }

        let mut comment = None;
        let body = match node.child_by_field_name("body") {
            Some(body_node) => {
                let mut statements = Vec::new();
                let mut first_statement = true;
                for child in named_children(&body_node) {
                    if first_statement && child.kind() != "comment" {
                        first_statement = false;
                        if let Some(doc) = self.promote_docstring(&child) {
                            comment = Some(doc);
                            continue;
                        }
                    }
                    if let Some(stmt) = self.lower_statement(&child)? {
                        statements.push(stmt);
                    }
                }
                Block::new(statements, node_to_span(&body_node))
            }
            None => Block::empty(span),
        };

        Ok(MethodDeclaration {
            clean_name: clean_name(&name),
            visibility: visibility_of(&name),
            is_constructor: name == "__init__",
            name,
            parameters,
            body,
            is_async,
            is_abstract: false,
            is_static: false,
            return_type,
            annotations,
            comment,
            span,
        })
    }

    /// Lower a parameter list. Untyped names get the catch-all `object`
    /// annotation; `*args` and `**kwargs` carry their flags and never a
    /// default.
    pub(crate) fn lower_parameters(&mut self, params_node: &Node) -> Vec<SingleVariableDeclaration> {
        let mut parameters = Vec::new();
        for param in named_children(params_node) {
            let span = node_to_span(&param);
            match param.kind() {
                "identifier" => {
                    parameters.push(SingleVariableDeclaration::untyped(self.text(&param), true, span));
                }
                "typed_parameter" => {
                    // *args: int parses the splat inside the typed node.
                    let inner = param.named_child(0);
                    let inner_kind = inner.map(|n| n.kind());
                    let name = inner.map(|n| self.parameter_name(&n)).unwrap_or_default();
                    let type_annotation = param
                        .child_by_field_name("type")
                        .map(|t| self.text(&t).to_string())
                        .unwrap_or_else(|| "object".to_string());
                    parameters.push(SingleVariableDeclaration {
                        name,
                        default_value: None,
                        type_annotation,
                        is_parameter: true,
                        is_var_args: inner_kind == Some("list_splat_pattern"),
                        is_kw_args: inner_kind == Some("dictionary_splat_pattern"),
                        span,
                    });
                }
                "default_parameter" | "typed_default_parameter" => {
                    let name = param
                        .child_by_field_name("name")
                        .map(|n| self.parameter_name(&n))
                        .unwrap_or_default();
                    let type_annotation = param
                        .child_by_field_name("type")
                        .map(|t| self.text(&t).to_string())
                        .unwrap_or_else(|| "object".to_string());
                    let default_value = param
                        .child_by_field_name("value")
                        .map(|v| self.lower_expression(&v));
                    parameters.push(SingleVariableDeclaration {
                        name,
                        default_value,
                        type_annotation,
                        is_parameter: true,
                        is_var_args: false,
                        is_kw_args: false,
                        span,
                    });
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    let name = param
                        .named_child(0)
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    parameters.push(SingleVariableDeclaration {
                        name,
                        default_value: None,
                        type_annotation: "object".to_string(),
                        is_parameter: true,
                        is_var_args: param.kind() == "list_splat_pattern",
                        is_kw_args: param.kind() == "dictionary_splat_pattern",
                        span,
                    });
                }
                // Bare `/` and `*` separators carry no binding.
                "positional_separator" | "keyword_separator" => {}
                kind => {
                    self.note(format!("unsupported parameter form `{kind}`"), span);
                }
            }
        }
        parameters
    }

    fn parameter_name(&self, node: &Node) -> String {
        match node.kind() {
            "identifier" => self.text(node).to_string(),
            // *args: int parses the splat inside the typed parameter.
            "list_splat_pattern" | "dictionary_splat_pattern" => node
                .named_child(0)
                .map(|n| self.text(&n).to_string())
                .unwrap_or_default(),
            _ => self.text(node).to_string(),
        }
    }

    /// Lower a decorated class or function. Every decorator reassigns the
    /// abstract and static flags, so the last one wins.
    pub(crate) fn lower_decorated(&mut self, node: &Node) -> Result<Statement> {
        let mut annotations = Vec::new();
        for decorator in children(node) {
            if decorator.kind() == "decorator" {
                annotations.push(self.lower_decorator(&decorator));
            }
        }

        let definition = match node.child_by_field_name("definition") {
            Some(definition) => definition,
            None => {
                self.warn("decorated definition without body", node_to_span(node));
                return Ok(Statement::Block(Block::empty(node_to_span(node))));
            }
        };

        match definition.kind() {
            "class_definition" => Ok(Statement::Type(self.lower_class(&definition, annotations)?)),
            _ => {
                // Flags come from the decorators alone, not the synthetic
                // async marker the function lowerer may append.
                let decorator_names: Vec<String> =
                    annotations.iter().map(|a| a.name.clone()).collect();
                let mut method = self.lower_function(&definition, annotations)?;
                for name in &decorator_names {
                    if name == "abstractmethod" || name.ends_with(".abstractmethod") {
                        method.is_abstract = true;
                    } else if name == "staticmethod" || name.ends_with(".staticmethod") {
                        method.is_static = true;
                    } else {
                        method.is_abstract = false;
                        method.is_static = false;
                    }
                }
                Ok(Statement::Method(method))
            }
        }
    }

    fn lower_decorator(&mut self, decorator: &Node) -> Annotation {
        let span = node_to_span(decorator);
        let Some(inner) = decorator.named_child(0) else {
            return Annotation::marker("", span);
        };
        match inner.kind() {
            "call" => {
                let name = inner
                    .child_by_field_name("function")
                    .map(|f| self.text(&f).to_string())
                    .unwrap_or_default();
                let mut annotation = Annotation::marker(name, span);
                if let Some(args) = inner.child_by_field_name("arguments") {
                    for arg in named_children(&args) {
                        if arg.kind() == "keyword_argument" {
                            let member_name = arg
                                .child_by_field_name("name")
                                .map(|n| self.text(&n).to_string())
                                .unwrap_or_default();
                            let value = match arg.child_by_field_name("value") {
                                Some(v) => self.lower_expression(&v),
                                None => Expression::name("", node_to_span(&arg)),
                            };
                            annotation.members.push((member_name, value));
                        } else {
                            annotation.arguments.push(self.lower_expression(&arg));
                        }
                    }
                }
                annotation
            }
            _ => Annotation::marker(self.text(&inner), span),
        }
    }
}

/// True when the suite contains a `return` anywhere, nested suites
/// included.
fn contains_return(node: &Node) -> bool {
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.kind() == "return_statement" {
            return true;
        }
        for child in children(&current) {
            stack.push(child);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tree_sitter::Parser;

    use super::*;
    use crate::shared::models::ast::Visibility;

    fn lower_first(code: &str) -> Statement {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        let node = tree.root_node().named_child(0).unwrap();
        let mut ctx = LoweringContext::new(code, "test.py");
        ctx.lower_statement(&node).unwrap().unwrap()
    }

    fn lower_class_decl(code: &str) -> TypeDeclaration {
        match lower_first(code) {
            Statement::Type(t) => t,
            other => panic!("expected class, got {other:?}"),
        }
    }

    fn lower_method_decl(code: &str) -> MethodDeclaration {
        match lower_first(code) {
            Statement::Method(m) => m,
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn abc_base_marks_class_abstract() {
        assert!(lower_class_decl("class A(ABC):\n    pass\n").is_abstract);
        assert!(lower_class_decl("class A(abc.ABC):\n    pass\n").is_abstract);
        assert!(lower_class_decl("class A(metaclass=ABCMeta):\n    pass\n").is_abstract);
        assert!(lower_class_decl("class A(metaclass = ABCMeta):\n    pass\n").is_abstract);
        assert!(!lower_class_decl("class A(Base):\n    pass\n").is_abstract);
    }

    #[test]
    fn metaclass_argument_is_not_a_superclass() {
        let decl = lower_class_decl("class A(Base, metaclass=ABCMeta):\n    pass\n");
        assert_eq!(decl.superclasses, vec!["Base"]);
        assert!(decl.is_abstract);

        let decl = lower_class_decl("class A(Base, metaclass = ABCMeta):\n    pass\n");
        assert_eq!(decl.superclasses, vec!["Base"]);
        assert!(decl.is_abstract);
    }

    #[test]
    fn enum_bases_mark_class_enum() {
        assert!(lower_class_decl("class Color(Enum):\n    RED = 1\n").is_enum);
        assert!(lower_class_decl("class Color(enum.Enum):\n    RED = 1\n").is_enum);
        assert!(lower_class_decl("class Color(IntFlag):\n    RED = 1\n").is_enum);
        assert!(!lower_class_decl("class Color(Base):\n    pass\n").is_enum);
    }

    #[test]
    fn class_body_is_classified_into_buckets() {
        let code = concat!(
            "class Point:\n",
            "    \"\"\"A 2D point.\"\"\"\n",
            "    origin = None\n",
            "    def __init__(self, x):\n",
            "        self.x = x\n",
            "    print('side effect')\n",
        );
        let decl = lower_class_decl(code);
        assert_eq!(decl.comments.len(), 1);
        assert!(decl.comments[0].is_doc);
        assert_eq!(decl.comments[0].text, "A 2D point.");
        assert_eq!(decl.assignments.len(), 1);
        assert_eq!(decl.methods.len(), 1);
        assert_eq!(decl.statements.len(), 1);
    }

    #[test]
    fn class_body_strings_are_promoted_at_any_position() {
        let code = concat!(
            "class A:\n",
            "    x = 1\n",
            "    \"\"\"Interleaved notes.\"\"\"\n",
            "    y = 2\n",
        );
        let decl = lower_class_decl(code);
        assert_eq!(decl.comments.len(), 1);
        assert_eq!(decl.comments[0].text, "Interleaved notes.");
        assert_eq!(decl.assignments.len(), 2);
        assert!(decl.statements.is_empty());
    }

    #[test]
    fn init_is_constructor_with_public_visibility() {
        let method = lower_method_decl("def __init__(self):\n    pass\n");
        assert!(method.is_constructor);
        assert_eq!(method.visibility, Visibility::Public);
        assert_eq!(method.clean_name, "init");
    }

    #[test]
    fn parameters_keep_annotations_defaults_and_splat_flags() {
        let method =
            lower_method_decl("def f(a, b: int, c=1, d: str = 'x', *args, **kwargs):\n    pass\n");
        assert_eq!(method.parameters.len(), 6);
        assert_eq!(method.parameters[0].type_annotation, "object");
        assert_eq!(method.parameters[1].type_annotation, "int");
        assert!(method.parameters[2].default_value.is_some());
        assert_eq!(method.parameters[3].type_annotation, "str");
        assert!(method.parameters[4].is_var_args);
        assert!(method.parameters[4].default_value.is_none());
        assert!(method.parameters[5].is_kw_args);
    }

    #[test]
    fn typed_splat_parameters_keep_flags_and_annotations() {
        let method = lower_method_decl("def f(*args: int, **kwargs: str):\n    pass\n");
        assert_eq!(method.parameters.len(), 2);
        assert!(method.parameters[0].is_var_args);
        assert_eq!(method.parameters[0].name, "args");
        assert_eq!(method.parameters[0].type_annotation, "int");
        assert!(method.parameters[1].is_kw_args);
        assert_eq!(method.parameters[1].type_annotation, "str");
    }

    #[test]
    fn return_type_prefers_annotation_then_inference() {
        assert_eq!(
            lower_method_decl("def f() -> int:\n    return 1\n").return_type,
            "int"
        );
        assert_eq!(
            lower_method_decl("def f():\n    return compute()\n").return_type,
            "object"
        );
        assert_eq!(lower_method_decl("def f():\n    pass\n").return_type, "None");
        // Nested returns count.
        assert_eq!(
            lower_method_decl("def f():\n    if x:\n        return 1\n").return_type,
            "object"
        );
    }

    #[test]
    fn docstring_moves_from_body_to_comment() {
        let method = lower_method_decl("def f():\n    \"\"\"Doc.\"\"\"\n    return 1\n");
        assert_eq!(method.comment.as_ref().map(|c| c.text.as_str()), Some("Doc."));
        assert_eq!(method.body.statements.len(), 1);
    }

    #[test]
    fn async_def_sets_flag_and_marker_annotation() {
        let method = lower_method_decl("async def f():\n    pass\n");
        assert!(method.is_async);
        assert!(method.annotations.iter().any(|a| a.name == "async"));
    }

    #[test]
    fn recognized_decorators_accumulate_their_flags() {
        let method = lower_method_decl("@staticmethod\ndef f():\n    pass\n");
        assert!(method.is_static);
        assert!(!method.is_abstract);

        let method = lower_method_decl(
            "@staticmethod\n@abstractmethod\ndef f():\n    pass\n",
        );
        assert!(method.is_static);
        assert!(method.is_abstract);

        let method = lower_method_decl(
            "@other\n@abc.abstractmethod\ndef f():\n    pass\n",
        );
        assert!(method.is_abstract);
    }

    #[test]
    fn unrecognized_decorator_clears_both_flags() {
        let method = lower_method_decl(
            "@abstractmethod\n@other\ndef f():\n    pass\n",
        );
        assert!(!method.is_abstract);
        assert!(!method.is_static);
    }

    #[test]
    fn async_marker_does_not_disturb_decorator_flags() {
        let method = lower_method_decl(
            "@abstractmethod\nasync def f():\n    pass\n",
        );
        assert!(method.is_abstract);
        assert!(method.is_async);
    }

    #[test]
    fn call_decorator_splits_positional_and_keyword_arguments() {
        let method = lower_method_decl(
            "@register('name', priority=2)\ndef f():\n    pass\n",
        );
        let annotation = &method.annotations[0];
        assert_eq!(annotation.name, "register");
        assert_eq!(annotation.arguments.len(), 1);
        assert_eq!(annotation.members.len(), 1);
        assert_eq!(annotation.members[0].0, "priority");
    }
}
