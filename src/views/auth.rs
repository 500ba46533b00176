//! Login and account sign-up forms.

use leptos::prelude::*;

use super::PageContext;
use super::layout::Layout;

#[component]
pub fn LoginPage(ctx: PageContext, email: String) -> impl IntoView {
    view! {
        <Layout ctx=ctx>
            <section class="auth-card">
                <h1>"Log in"</h1>
                <form method="post" action="/login" class="form">
                    <label>
                        "Email"
                        <input type="email" name="email" value=email required=true autocomplete="username"/>
                    </label>
                    <label>
                        "Password"
                        <input type="password" name="password" required=true autocomplete="current-password"/>
                    </label>
                    <button type="submit" class="btn btn--primary">"Log in"</button>
                </form>
                <p>"No account? " <a href="/register">"Sign up"</a></p>
            </section>
        </Layout>
    }
}

#[component]
pub fn RegisterPage(ctx: PageContext, name: String, email: String) -> impl IntoView {
    view! {
        <Layout ctx=ctx>
            <section class="auth-card">
                <h1>"Create an account"</h1>
                <form method="post" action="/register" class="form">
                    <label>
                        "Full name"
                        <input type="text" name="name" value=name required=true/>
                    </label>
                    <label>
                        "Email"
                        <input type="email" name="email" value=email required=true autocomplete="username"/>
                    </label>
                    <label>
                        "Password"
                        <input type="password" name="password" required=true minlength="6" autocomplete="new-password"/>
                    </label>
                    <label>
                        "Confirm password"
                        <input type="password" name="confirm_password" required=true autocomplete="new-password"/>
                    </label>
                    <button type="submit" class="btn btn--primary">"Sign up"</button>
                </form>
                <p>"Already registered? " <a href="/login">"Log in"</a></p>
            </section>
        </Layout>
    }
}
