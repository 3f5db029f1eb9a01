//! Source of the annotation class itself
//!
//! Published once per pass so user declarations can reference the annotation
//! before any candidate exists.

use crate::identity::definition_identity;
use crate::models::{AnnotationSpec, RenderedUnit};
use crate::synthesizer::GENERATED_HEADER;

/// Render the definition unit for an annotation
pub fn annotation_definition(spec: &AnnotationSpec, namespace: &str) -> RenderedUnit {
    let name = spec.name;
    let interface = spec.contract.interface();
    let element = spec.element_type_param_name;
    let backing = spec.backing_field_param_name;

    let mut text = String::from("#nullable enable\n");
    text.push_str(GENERATED_HEADER);
    text.push_str("using System;\n");
    text.push_str("using System.Collections.Generic;\n\n");
    text.push_str(&format!("namespace {namespace}\n{{\n"));
    text.push_str("    /// <summary>\n");
    text.push_str("    /// When you decorate a partial class with this attribute,\n");
    text.push_str(&format!(
        "    /// an <see cref=\"{interface}{{T}}\" /> implementation is generated for your class\n"
    ));
    text.push_str("    /// </summary>\n");
    text.push_str("    /// <example>\n    /// <code>\n");
    text.push_str(&format!("    /// [{name}(typeof(string))]\n"));
    text.push_str("    /// public partial class MyStringCollection;\n");
    text.push_str("    /// </code>\n    /// </example>\n");
    text.push_str("    /// <example>\n    /// <code>\n");
    text.push_str(&format!("    /// [{name}(typeof(Thing), nameof(_things))]\n"));
    text.push_str("    /// public partial class MyThingCollection(IEnumerable&lt;Thing&gt; things)\n");
    text.push_str("    /// {\n");
    text.push_str(&format!(
        "    ///     private readonly {interface}&lt;Thing&gt; _things = things.ToList();\n"
    ));
    text.push_str("    /// }\n");
    text.push_str("    /// </code>\n    /// </example>\n");
    text.push_str("    [AttributeUsage(AttributeTargets.Class, Inherited = false)]\n");
    text.push_str(&format!("    internal sealed class {name} : Attribute\n    {{\n"));
    text.push_str(&format!("        internal {name}(\n"));
    text.push_str(&format!("            Type {element},\n"));
    text.push_str(&format!("            string? {backing} = null\n"));
    text.push_str("            ) { }\n");
    text.push_str("    }\n}\n");

    RenderedUnit {
        identity: definition_identity(name),
        text,
    }
}
