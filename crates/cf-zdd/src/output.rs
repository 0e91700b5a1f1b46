/// Printed for `push-zdd` without an application name.
pub(crate) const PUSH_ZDD_USAGE: &str = "\
NAME:
   push-zdd - Perform a zero-downtime push of an application over the top of an old one

USAGE:
   cf-zdd push-zdd APP_NAME [DEPLOY_FLAGS...]

   An existing instance named APP_NAME is renamed to APP_NAME-venerable, the new
   version is pushed as APP_NAME, and the venerable instance is deleted. If the
   push fails, the old instance gets its name back.

   DEPLOY_FLAGS are passed through to 'push' unchanged, e.g.:

   cf-zdd push-zdd myapp -f manifest.yml -p ./build

   Use 'cf-zdd push-zdd --dry-run APP_NAME ...' to print the plan without
   changing anything; --dry-run must come before APP_NAME.
";

pub(crate) const DEPLOY_SUCCEEDED: &str =
    "\nA new version of your application has successfully been pushed!\n";

pub(crate) fn existing_instance_found(name: &str) -> String {
    format!("\n{name} was found, using zero-downtime-deployment\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_is_multi_line_and_names_the_command() {
        assert!(PUSH_ZDD_USAGE.lines().count() > 3);
        assert!(PUSH_ZDD_USAGE.contains("cf-zdd push-zdd APP_NAME"));
    }

    #[test]
    fn found_message_names_the_instance() {
        assert_eq!(
            existing_instance_found("myapp").trim(),
            "myapp was found, using zero-downtime-deployment"
        );
    }
}
